use serde::Serialize;
use serde_json::Value;

use crate::contracts::types::SummaryData;
use crate::error::{ClientError, ClientResult};

/// Version tag of the JSON document shape, independent of the crate version.
pub const CONTRACT_VERSION: &str = "v1";

/// `{"ok": true, "version": "v1", "data": ...}`. `command` selects the text
/// renderer and is not part of the serialized document.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    #[serde(skip)]
    pub command: String,
    pub ok: bool,
    pub version: String,
    pub data: Value,
}

/// `{"error": {...}}`, plus `data` when the error carries details.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

pub fn summary_success(data: SummaryData) -> ClientResult<SuccessEnvelope> {
    let command = data.view.as_str();
    let json_data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        command: command.to_string(),
        ok: true,
        version: CONTRACT_VERSION.to_string(),
        data: json_data,
    })
}

impl From<&ClientError> for FailureEnvelope {
    fn from(error: &ClientError) -> Self {
        Self {
            error: ErrorContract {
                code: error.code.clone(),
                message: error.message.clone(),
                recovery_steps: error.recovery_steps.clone(),
            },
            data: error.data.clone(),
        }
    }
}
