pub(crate) mod input;
pub(crate) mod parse;

use tracing::debug;

use crate::aggregate::TransactionRecord;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct LoadedRecords {
    pub(crate) source_used: &'static str,
    pub(crate) source_ref: Option<String>,
    pub(crate) records: Vec<TransactionRecord>,
}

/// Reads and parses the source. Nothing here touches the engine, so a failed
/// read never reaches aggregation.
pub(crate) fn load(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<LoadedRecords> {
    let resolved = input::resolve_source(path, stdin_override)?;
    let records = parse::parse_source(&resolved.content)?;
    debug!(
        source = resolved.source_kind.as_str(),
        records = records.len(),
        "loaded transaction records"
    );

    Ok(LoadedRecords {
        source_used: resolved.source_kind.as_str(),
        source_ref: resolved.source_ref,
        records,
    })
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide JSON array or CSV input via path or stdin.".to_string(),
            "Run `ledgerlens dashboard --help` to confirm the record fields.".to_string(),
        ],
    )
    .with_input_help()
}
