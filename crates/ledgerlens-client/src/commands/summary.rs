use tracing::debug;

use crate::ClientResult;
use crate::aggregate::summarize;
use crate::contracts::envelope::{SuccessEnvelope, summary_success};
use crate::contracts::types::{RecordWarning, SummaryData, SummaryView};
use crate::ingest;

#[derive(Debug, Clone)]
pub struct SummaryRunOptions {
    pub view: SummaryView,
    pub path: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(view: SummaryView, path: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SummaryRunOptions {
        view,
        path,
        stdin_override: None,
    })
}

pub fn run_with_options(options: SummaryRunOptions) -> ClientResult<SuccessEnvelope> {
    let loaded = ingest::load(options.path, options.stdin_override)?;
    let summary = summarize(&loaded.records)?;
    debug!(view = options.view.as_str(), "summary ready");

    let bundle = summary.bundle;
    let includes_tallies = options.view.includes_tallies();
    let data = SummaryData {
        view: options.view,
        source_used: loaded.source_used.to_string(),
        source_ref: loaded.source_ref,
        records_read: summary.records_read,
        amounts_counted: summary.amounts_counted,
        merchant_totals: bundle.merchant_totals,
        category_totals: bundle.category_totals,
        gender_counts: includes_tallies.then_some(bundle.gender_counts),
        fraud_counts: includes_tallies.then_some(bundle.fraud_counts),
        mean_amount: bundle.mean_amount,
        median_amount: bundle.median_amount,
        warnings: if includes_tallies {
            summary.warnings
        } else {
            without_tally_warnings(summary.warnings)
        },
    };

    summary_success(data)
}

/// The analysis view has no gender or fraud section, so gaps there are noise.
fn without_tally_warnings(warnings: Vec<RecordWarning>) -> Vec<RecordWarning> {
    warnings
        .into_iter()
        .filter(|entry| !matches!(entry.field.as_str(), "gender" | "fraud"))
        .collect()
}
