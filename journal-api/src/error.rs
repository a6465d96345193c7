use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified failure of a gateway call.
///
/// Application errors carry the HTTP status; transport failures (connection
/// refused, timeouts, unreadable bodies) carry none.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<StatusCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Build the error for a non-success response from its raw parts.
    pub fn from_parts(status: StatusCode, content_type: &str, body: &str) -> Self {
        Self::new(status, error_message(status, content_type, body))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_conflict(&self) -> bool {
        self.status == Some(StatusCode::CONFLICT)
    }
}

fn fallback_message(status: StatusCode) -> String {
    format!("Request failed ({})", status.as_u16())
}

/// Best-effort human message: JSON `detail`, then JSON `message`, then the
/// raw text body, then a templated fallback.
fn error_message(status: StatusCode, content_type: &str, body: &str) -> String {
    if content_type.contains("application/json") {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return fallback_message(status);
        };
        return ["detail", "message"]
            .iter()
            .find_map(|key| {
                value
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .map(str::to_string)
            .unwrap_or_else(|| fallback_message(status));
    }

    if body.is_empty() {
        fallback_message(status)
    } else {
        body.to_string()
    }
}
