use crate::ToolError;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Outcome of one tool invocation.
///
/// Success carries its payload under a tool-specific key (`pr_url`, `changes`, ...); failure
/// carries only a message. Both render to the same single-level envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    Success { key: &'static str, payload: Value },
    Failure { message: String },
}

impl InvocationResult {
    pub fn success<T: Serialize + ?Sized>(key: &'static str, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(payload) => Self::Success { key, payload },
            Err(err) => Self::from(ToolError::query_failed(format!(
                "failed to serialize `{key}` payload: {err}"
            ))),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn to_envelope(&self) -> Value {
        let mut out = Map::new();
        match self {
            Self::Success { key, payload } => {
                out.insert("status".to_string(), json!(STATUS_SUCCESS));
                out.insert((*key).to_string(), payload.clone());
            }
            Self::Failure { message } => {
                out.insert("status".to_string(), json!(STATUS_ERROR));
                out.insert("message".to_string(), json!(message));
            }
        }
        Value::Object(out)
    }
}

impl From<ToolError> for InvocationResult {
    fn from(err: ToolError) -> Self {
        Self::failure(err.to_string())
    }
}
