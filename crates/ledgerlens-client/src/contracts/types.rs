use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryView {
    Dashboard,
    Analysis,
}

impl SummaryView {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Analysis => "analysis",
        }
    }

    pub const fn includes_tallies(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub male: i64,
    pub female: i64,
}

impl GenderCounts {
    pub fn total(&self) -> i64 {
        self.male + self.female
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FraudCounts {
    pub no_fraud: i64,
    pub fraud: i64,
}

impl FraudCounts {
    pub fn total(&self) -> i64 {
        self.no_fraud + self.fraud
    }
}

/// A record the engine could not use in full. The record still contributes
/// to every aggregate its remaining fields are valid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordWarning {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub view: SummaryView,
    pub source_used: String,
    pub source_ref: Option<String>,
    pub records_read: usize,
    pub amounts_counted: usize,
    pub merchant_totals: IndexMap<String, f64>,
    pub category_totals: IndexMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_counts: Option<GenderCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_counts: Option<FraudCounts>,
    pub mean_amount: f64,
    pub median_amount: f64,
    pub warnings: Vec<RecordWarning>,
}
