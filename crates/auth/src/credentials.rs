//! Persisted credentials and the store contract the session reads from.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Role, UserIdentity};

/// What a successful login leaves behind for later sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    /// Bearer token sent with authenticated requests.
    pub token: String,

    pub user: UserIdentity,

    pub issued_at: DateTime<Utc>,

    /// Absent when the backend does not report an expiry.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("no credentials stored")]
    Missing,

    #[error("credentials have expired")]
    Expired,

    #[error("credentials not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid credential time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("empty token")]
    EmptyToken,
}

/// Deterministically check stored credentials against `now`.
pub fn validate_credentials(
    credentials: &StoredCredentials,
    now: DateTime<Utc>,
) -> Result<(), CredentialError> {
    if credentials.token.trim().is_empty() {
        return Err(CredentialError::EmptyToken);
    }
    if now < credentials.issued_at {
        return Err(CredentialError::NotYetValid);
    }
    if let Some(expires_at) = credentials.expires_at {
        if expires_at <= credentials.issued_at {
            return Err(CredentialError::InvalidTimeWindow);
        }
        if now >= expires_at {
            return Err(CredentialError::Expired);
        }
    }
    Ok(())
}

/// Persisted authentication state.
///
/// The session layer only ever reads through the first three methods; `save`
/// and `clear` are called by [`crate::AuthService`] implementations.
pub trait CredentialStore: Send + Sync {
    fn is_authenticated(&self) -> bool;

    fn current_user(&self) -> Option<UserIdentity>;

    fn user_role(&self) -> Option<Role> {
        self.current_user().map(|u| u.role)
    }

    /// Token to attach to authenticated requests, if still valid.
    fn token(&self) -> Option<String>;

    fn save(&self, credentials: StoredCredentials);

    fn clear(&self);
}

/// Process-local credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            inner: Mutex::new(Some(credentials)),
        }
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), CredentialError> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(credentials) => validate_credentials(credentials, now),
            None => Err(CredentialError::Missing),
        }
    }

    fn valid_credentials(&self) -> Option<StoredCredentials> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let credentials = guard.as_ref()?;
        match validate_credentials(credentials, Utc::now()) {
            Ok(()) => Some(credentials.clone()),
            Err(e) => {
                tracing::debug!(error = %e, "stored credentials rejected");
                None
            }
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn is_authenticated(&self) -> bool {
        self.valid_credentials().is_some()
    }

    fn current_user(&self) -> Option<UserIdentity> {
        self.valid_credentials().map(|c| c.user)
    }

    fn token(&self) -> Option<String> {
        self.valid_credentials().map(|c| c.token)
    }

    fn save(&self, credentials: StoredCredentials) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(credentials);
    }

    fn clear(&self) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn credentials(issued_at: DateTime<Utc>, expires_at: Option<DateTime<Utc>>) -> StoredCredentials {
        StoredCredentials {
            token: "tok".to_string(),
            user: UserIdentity::new("Ana", "admin"),
            issued_at,
            expires_at,
        }
    }

    #[test]
    fn accepts_credentials_inside_window() {
        let now = Utc::now();
        let c = credentials(now - Duration::minutes(1), Some(now + Duration::minutes(10)));
        assert_eq!(validate_credentials(&c, now), Ok(()));
    }

    #[test]
    fn accepts_credentials_without_expiry() {
        let now = Utc::now();
        let c = credentials(now - Duration::days(30), None);
        assert_eq!(validate_credentials(&c, now), Ok(()));
    }

    #[test]
    fn rejects_expired_and_future_credentials() {
        let now = Utc::now();
        let expired = credentials(now - Duration::hours(2), Some(now - Duration::hours(1)));
        assert_eq!(validate_credentials(&expired, now), Err(CredentialError::Expired));

        let future = credentials(now + Duration::hours(1), Some(now + Duration::hours(2)));
        assert_eq!(validate_credentials(&future, now), Err(CredentialError::NotYetValid));

        let inverted = credentials(now - Duration::hours(1), Some(now - Duration::hours(2)));
        assert_eq!(
            validate_credentials(&inverted, now),
            Err(CredentialError::InvalidTimeWindow)
        );
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.validate_at(Utc::now()), Err(CredentialError::Missing));

        store.save(credentials(Utc::now() - Duration::seconds(5), None));
        assert!(store.is_authenticated());
        assert_eq!(store.user_role(), Some(Role::ADMIN));
        assert_eq!(store.token().as_deref(), Some("tok"));

        store.clear();
        assert!(!store.is_authenticated());
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn expired_credentials_read_as_logged_out() {
        let now = Utc::now();
        let store = MemoryCredentialStore::with_credentials(credentials(
            now - Duration::hours(2),
            Some(now - Duration::hours(1)),
        ));
        assert!(!store.is_authenticated());
        assert_eq!(store.current_user(), None);
        assert_eq!(store.token(), None);
    }
}
