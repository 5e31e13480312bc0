//! Backend login over the shared transport.

use std::sync::Arc;

use chrono::Utc;

use rhc_auth::{AuthService, AuthServiceError, CredentialStore, LoginCredentials, LoginResponse, StoredCredentials};

use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport, decode, to_body};

pub const LOGIN_PATH: &str = "/auth/login";

/// [`AuthService`] that posts to the backend and persists the returned token
/// and user into a [`CredentialStore`].
pub struct ApiAuthService {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    login_path: String,
}

impl core::fmt::Debug for ApiAuthService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiAuthService")
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

impl ApiAuthService {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            transport,
            store,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }
}

#[async_trait::async_trait]
impl AuthService for ApiAuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, AuthServiceError> {
        let body = to_body(credentials).map_err(|e| AuthServiceError::InvalidResponse(e.to_string()))?;
        let value = match self.transport.send(ApiRequest::post(&self.login_path, body)).await {
            Ok(value) => value,
            // Refused credentials come back as 4xx with the reason in the body.
            Err(err) if err.is_rejection() => return Ok(LoginResponse::rejected(err.to_string())),
            Err(ApiError::Parse(msg)) => return Err(AuthServiceError::InvalidResponse(msg)),
            Err(err) => return Err(AuthServiceError::Transport(err.to_string())),
        };

        let response: LoginResponse = decode(value).map_err(|e| AuthServiceError::InvalidResponse(e.to_string()))?;
        if !response.success {
            return Ok(response);
        }

        let (Some(token), Some(user)) = (response.token.clone(), response.user.clone()) else {
            return Err(AuthServiceError::InvalidResponse(
                "successful login without token or user".to_string(),
            ));
        };
        self.store.save(StoredCredentials {
            token,
            user,
            issued_at: Utc::now(),
            expires_at: response.expires_at,
        });
        Ok(response)
    }

    fn logout(&self) {
        self.store.clear();
    }
}
