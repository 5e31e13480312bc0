//! Contract of the backend authentication service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UserIdentity;

/// Login form payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Backend answer to a login attempt.
///
/// A rejected login is a normal response (`success == false`), not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl LoginResponse {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
            user: None,
            expires_at: None,
        }
    }
}

/// Failure to obtain a login response at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthServiceError {
    /// Network or HTTP-level failure; carries the transport's message.
    #[error("{0}")]
    Transport(String),

    /// The response could not be understood.
    #[error("invalid login response: {0}")]
    InvalidResponse(String),
}

/// Backend authentication service.
///
/// Implementations persist credentials into their [`crate::CredentialStore`]
/// on a successful login so the session can read the user back from it.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, AuthServiceError>;

    /// Clear persisted credentials. Never fails.
    fn logout(&self);
}
