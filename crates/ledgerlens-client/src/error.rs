use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::aggregate::AggregateError;

pub(crate) const INPUT_HELP_COMMAND: &str = "ledgerlens dashboard --help";
pub(crate) const INPUT_HELP_SECTION_TITLE: &str = "Input Troubleshooting";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_input_help(self) -> Self {
        self.with_input_help_data(json!({}))
    }

    pub fn with_input_help_data(self, data: Value) -> Self {
        self.with_data(merge_input_help_data(data))
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `ledgerlens {cmd} --help` for usage."),
            None => "Run `ledgerlens --help` for usage.".to_string(),
        };
        Self::new("invalid_argument", message, vec![help_hint])
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_import_format(message: &str, received_format: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a supported input format (JSON array or CSV).".to_string(),
                "Run `ledgerlens dashboard --help` to confirm field names.".to_string(),
            ],
        )
        .with_input_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn record_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        let mut expected_headers = required_headers.clone();
        expected_headers.extend(optional_headers.clone());

        Self::new(
            "record_schema_mismatch",
            "CSV headers do not satisfy the transaction record schema.",
            vec![
                "Include the `amount`, `merchant` and `category` headers.".to_string(),
                "Only `gender` and `fraud` may be added; remove any other header.".to_string(),
                "Run `ledgerlens dashboard --help` to review the record fields.".to_string(),
            ],
        )
        .with_input_help_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn source_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "source_unreadable",
            &format!("Could not read transaction source `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Or pipe the records on stdin and pass `-` as the path.".to_string(),
            ],
        )
        .with_data(json!({ "path": location }))
    }

    pub fn no_data(records_read: usize) -> Self {
        Self::new(
            "no_data",
            &format!(
                "No transaction amounts to summarize ({records_read} records read). Mean and median are undefined."
            ),
            vec![
                "Check that the source contains at least one record with a numeric `amount`."
                    .to_string(),
                "Run `ledgerlens dashboard --help` to review the record fields.".to_string(),
            ],
        )
        .with_input_help_data(json!({
            "records_read": records_read,
        }))
    }

    pub fn non_finite_figure(figure: &str) -> Self {
        Self::new(
            "non_finite_figure",
            &format!("`{figure}` is too large to represent; the amounts overflow a 64-bit float."),
            vec![
                "Check the source for amounts with misplaced exponents or separators.".to_string(),
                "Split the source so each run sums to a representable total.".to_string(),
            ],
        )
        .with_data(json!({ "figure": figure }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

impl From<AggregateError> for ClientError {
    fn from(error: AggregateError) -> Self {
        match error {
            AggregateError::EmptyInput { records_read } => Self::no_data(records_read),
            AggregateError::NonFinite { figure } => Self::non_finite_figure(&figure),
        }
    }
}

fn merge_input_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(INPUT_HELP_COMMAND.to_string()),
        );
        object.insert(
            "help_section_title".to_string(),
            Value::String(INPUT_HELP_SECTION_TITLE.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::ClientError;
    use crate::aggregate::AggregateError;

    #[test]
    fn empty_input_maps_to_no_data_code() {
        let error = ClientError::from(AggregateError::EmptyInput { records_read: 3 });
        assert_eq!(error.code, "no_data");
        assert!(error.message.contains("3 records read"));
        assert!(!error.recovery_steps.is_empty());
    }

    #[test]
    fn non_finite_figure_is_a_user_facing_error() {
        let error = ClientError::from(AggregateError::NonFinite {
            figure: "mean_amount".to_string(),
        });
        assert_eq!(error.code, "non_finite_figure");
        assert!(!error.code.starts_with("internal_"));
        let data = error.data.unwrap_or(Value::Null);
        assert_eq!(data["figure"], Value::String("mean_amount".to_string()));
    }

    #[test]
    fn input_help_data_is_merged_into_non_object_payloads() {
        let error = ClientError::invalid_argument("bad").with_input_help_data(Value::Null);
        let data = error.data.unwrap_or(Value::Null);
        assert_eq!(
            data["help_command"],
            Value::String("ledgerlens dashboard --help".to_string())
        );
    }
}
