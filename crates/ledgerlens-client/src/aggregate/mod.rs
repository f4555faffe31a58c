//! The aggregation engine: a pure transformation from transaction records to
//! the summary bundle that presentation layers render.
//!
//! Malformed fields never abort a run. Each one is recorded as a
//! [`RecordWarning`] and the record keeps contributing to every aggregate its
//! other fields are valid for. A run fails only when no usable amount exists
//! (mean and median are undefined) or when a figure leaves the finite `f64`
//! range, which JSON cannot carry.

pub mod grouped;
pub mod normalize;
mod record;
pub mod stats;
pub mod tally;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::contracts::types::{FraudCounts, GenderCounts, RecordWarning};

use grouped::GroupedTotals;
use normalize::{AmountField, Categorical, classify_fraud, classify_gender, normalize_key};

pub use record::TransactionRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("no valid transaction amounts among {records_read} records")]
    EmptyInput { records_read: usize },
    #[error("{figure} is outside the finite number range")]
    NonFinite { figure: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBundle {
    pub merchant_totals: IndexMap<String, f64>,
    pub category_totals: IndexMap<String, f64>,
    pub gender_counts: GenderCounts,
    pub fraud_counts: FraudCounts,
    pub mean_amount: f64,
    pub median_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub bundle: SummaryBundle,
    pub records_read: usize,
    pub amounts_counted: usize,
    pub warnings: Vec<RecordWarning>,
}

pub fn summarize(records: &[TransactionRecord]) -> Result<Summary, AggregateError> {
    let mut merchants = GroupedTotals::new();
    let mut categories = GroupedTotals::new();
    let mut gender_counts = GenderCounts::default();
    let mut fraud_counts = FraudCounts::default();
    let mut amounts = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();
    // A field no record carries is an omitted column, not a gap per record.
    let gender_supplied = records.iter().any(|record| record.gender.is_some());
    let fraud_supplied = records.iter().any(|record| record.fraud.is_some());

    for record in records {
        let amount = match normalize::parse_amount(record.amount.as_deref()) {
            AmountField::Value(value) => Some(value),
            AmountField::Missing => {
                warnings.push(warning(
                    record.row,
                    "amount",
                    "missing_amount",
                    "amount is missing; the record adds nothing to totals, mean or median.",
                    None,
                ));
                None
            }
            AmountField::Invalid(raw) => {
                warnings.push(warning(
                    record.row,
                    "amount",
                    "invalid_amount",
                    &format!(
                        "amount must be a finite number; got \"{raw}\". The record adds nothing to totals, mean or median."
                    ),
                    Some(raw),
                ));
                None
            }
        };

        if let Some(value) = amount {
            amounts.push(value);
        }

        group_by_key(
            &mut merchants,
            record,
            "merchant",
            record.merchant.as_deref(),
            amount,
            &mut warnings,
        );
        group_by_key(
            &mut categories,
            record,
            "category",
            record.category.as_deref(),
            amount,
            &mut warnings,
        );

        match classify_gender(record.gender.as_deref()) {
            Categorical::Known(gender) => tally::record_gender(&mut gender_counts, gender),
            Categorical::Missing if !gender_supplied => {}
            Categorical::Missing => warnings.push(warning(
                record.row,
                "gender",
                "missing_gender",
                "gender is missing; the record is left out of gender counts.",
                None,
            )),
            Categorical::Unknown(marker) => warnings.push(warning(
                record.row,
                "gender",
                "unknown_gender",
                &format!(
                    "gender must be M or F; got \"{marker}\". The record is left out of gender counts."
                ),
                Some(marker),
            )),
        }

        match classify_fraud(record.fraud.as_deref()) {
            Categorical::Known(status) => tally::record_fraud(&mut fraud_counts, status),
            Categorical::Missing if !fraud_supplied => {}
            Categorical::Missing => warnings.push(warning(
                record.row,
                "fraud",
                "missing_fraud",
                "fraud is missing; the record is left out of fraud counts.",
                None,
            )),
            Categorical::Unknown(marker) => warnings.push(warning(
                record.row,
                "fraud",
                "unknown_fraud",
                &format!(
                    "fraud must be 0 or 1; got \"{marker}\". The record is left out of fraud counts."
                ),
                Some(marker),
            )),
        }
    }

    log_warnings(&warnings);

    let records_read = records.len();
    let mean_amount =
        stats::mean(&amounts).map_err(|error| with_records_read(error, records_read))?;
    let median_amount =
        stats::median(&amounts).map_err(|error| with_records_read(error, records_read))?;
    ensure_finite_totals("merchant_totals", &merchants)?;
    ensure_finite_totals("category_totals", &categories)?;

    debug!(
        records_read,
        amounts_counted = amounts.len(),
        merchants = merchants.len(),
        categories = categories.len(),
        warnings = warnings.len(),
        "summarized transaction records"
    );

    Ok(Summary {
        bundle: SummaryBundle {
            merchant_totals: merchants.into_map(),
            category_totals: categories.into_map(),
            gender_counts,
            fraud_counts,
            mean_amount,
            median_amount,
        },
        records_read,
        amounts_counted: amounts.len(),
        warnings,
    })
}

fn group_by_key(
    totals: &mut GroupedTotals,
    record: &TransactionRecord,
    field: &str,
    raw_key: Option<&str>,
    amount: Option<f64>,
    warnings: &mut Vec<RecordWarning>,
) {
    let Some(key) = normalize_key(raw_key) else {
        warnings.push(warning(
            record.row,
            field,
            &format!("missing_{field}"),
            &format!("{field} is missing or blank; the record is left out of {field} totals."),
            None,
        ));
        return;
    };

    match amount {
        Some(value) => totals.add(&key, value),
        None => totals.touch(&key),
    }
}

fn with_records_read(error: AggregateError, records_read: usize) -> AggregateError {
    match error {
        AggregateError::EmptyInput { .. } => AggregateError::EmptyInput { records_read },
        other => other,
    }
}

fn ensure_finite_totals(figure: &str, totals: &GroupedTotals) -> Result<(), AggregateError> {
    for (key, total) in totals.iter() {
        stats::finite(&format!("{figure}[{key}]"), total)?;
    }
    Ok(())
}

/// One `warn!` per warning code; the per-record detail goes to `debug!`.
fn log_warnings(warnings: &[RecordWarning]) {
    let mut counts: IndexMap<&str, (&str, usize)> = IndexMap::new();
    for entry in warnings {
        debug!(row = entry.row, field = %entry.field, code = %entry.code, "{}", entry.description);
        counts
            .entry(entry.code.as_str())
            .or_insert((entry.field.as_str(), 0))
            .1 += 1;
    }

    for (code, (field, count)) in counts {
        warn!(code, field, count, "records skipped for {field}");
    }
}

fn warning(
    row: i64,
    field: &str,
    code: &str,
    description: &str,
    received: Option<String>,
) -> RecordWarning {
    RecordWarning {
        row,
        field: field.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        received,
    }
}
