use reqwest::{header::CONTENT_TYPE, Response, StatusCode};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Successful response body, before any endpoint-specific interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204, or a success response without a body.
    Empty,
    Json(Value),
    Text(String),
}

impl Payload {
    pub(crate) async fn from_response(response: Response) -> Result<Self> {
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Self::Empty);
        }

        let content_type = content_type(&response);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response body: {e}")))?;

        Self::from_parts(status, &content_type, body)
    }

    pub(crate) fn from_parts(
        status: StatusCode,
        content_type: &str,
        body: String,
    ) -> Result<Self> {
        if body.is_empty() {
            return Ok(Self::Empty);
        }
        if content_type.contains("application/json") {
            return serde_json::from_str(&body).map(Self::Json).map_err(|e| {
                ApiError::new(status, format!("Failed to parse response as JSON: {e}"))
            });
        }
        Ok(Self::Text(body))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

pub(crate) fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
