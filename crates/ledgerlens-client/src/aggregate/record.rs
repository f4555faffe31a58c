/// One transaction as the source provided it.
///
/// Every field keeps the raw text so that malformed values reach the engine
/// and become warnings rather than ingest failures. JSON numbers are carried
/// as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRecord {
    pub row: i64,
    pub amount: Option<String>,
    pub merchant: Option<String>,
    pub category: Option<String>,
    pub gender: Option<String>,
    pub fraud: Option<String>,
}

impl TransactionRecord {
    pub fn new(row: i64) -> Self {
        Self {
            row,
            ..Self::default()
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    pub fn with_raw_amount(mut self, amount: &str) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    pub fn with_merchant(mut self, merchant: &str) -> Self {
        self.merchant = Some(merchant.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    pub fn with_fraud(mut self, fraud: &str) -> Self {
        self.fraud = Some(fraud.to_string());
        self
    }
}
