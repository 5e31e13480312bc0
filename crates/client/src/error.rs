use thiserror::Error;

use rhc_core::DomainError;

/// Failure talking to the backend.
///
/// `Display` is the text shown to users, so API errors print the backend's
/// own message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl ApiError {
    /// Build an API error from a non-success response body.
    ///
    /// Uses the body's `message` field when present, then the raw body, then
    /// the status code.
    pub fn from_response(status: u16, body: &str) -> Self {
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
        let message = match from_json {
            Some(m) if !m.trim().is_empty() => m,
            _ if !body.trim().is_empty() => body.trim().to_string(),
            _ => format!("request failed with status code {status}"),
        };
        Self::Api { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 400, 401 and 403: the backend refused the request itself.
    pub fn is_rejection(&self) -> bool {
        matches!(self.status(), Some(400 | 401 | 403))
    }
}
