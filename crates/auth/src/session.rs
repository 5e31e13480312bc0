//! Session state: who is logged in.
//!
//! [`SessionManager`] is the single writer. It is shared by `Arc` with the
//! navigation guard and the views, which only ever read a [`Session`] value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::{AuthService, CredentialStore, LoginCredentials, Role, UserIdentity};

/// Message used when a failed login carries no text of its own.
pub const CONNECTION_ERROR_MESSAGE: &str = "connection error";

pub const LOGIN_IN_PROGRESS_MESSAGE: &str = "a login request is already in progress";

/// In-memory authentication state.
///
/// An anonymous session never carries a user; the constructors are the only
/// way to build one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    authenticated: bool,
    user: Option<UserIdentity>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An authenticated session. `user` may be absent when the credential
    /// store has a token but no profile.
    pub fn authenticated(user: Option<UserIdentity>) -> Self {
        Self {
            authenticated: true,
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn user_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("")
    }
}

/// Result of a login attempt, always returned as a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: String,
}

impl LoginOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Releases the in-flight flag on drop, including on early return.
struct LoginFlight<'a>(&'a AtomicBool);

impl<'a> LoginFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoginFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owner of the process session.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    auth: Arc<dyn AuthService>,
    state: RwLock<Session>,
    login_in_flight: AtomicBool,
}

impl core::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.snapshot())
            .field("login_in_flight", &self.login_in_flight.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a manager with an anonymous session. Call [`Self::init_auth`]
    /// to pick up persisted credentials.
    pub fn new(store: Arc<dyn CredentialStore>, auth: Arc<dyn AuthService>) -> Self {
        Self {
            store,
            auth,
            state: RwLock::new(Session::anonymous()),
            login_in_flight: AtomicBool::new(false),
        }
    }

    /// Load the session from the credential store. Never fails.
    pub fn init_auth(&self) {
        let session = if self.store.is_authenticated() {
            Session::authenticated(self.store.current_user())
        } else {
            Session::anonymous()
        };
        tracing::debug!(
            authenticated = session.is_authenticated(),
            role = session.role().map(|r| r.as_str()),
            "session initialized from credential store"
        );
        self.replace(session);
    }

    /// Attempt a login.
    ///
    /// Never returns an error: rejections and transport failures come back as
    /// an unsuccessful [`LoginOutcome`] and leave the session untouched. Only
    /// one login may be in flight; a concurrent call is refused immediately.
    pub async fn login(&self, credentials: &LoginCredentials) -> LoginOutcome {
        let Some(_flight) = LoginFlight::acquire(&self.login_in_flight) else {
            tracing::warn!(email = %credentials.email, "login refused: another login is in flight");
            return LoginOutcome::failure(LOGIN_IN_PROGRESS_MESSAGE);
        };

        match self.auth.login(credentials).await {
            Ok(response) if response.success => {
                self.replace(Session::authenticated(self.store.current_user()));
                tracing::info!(email = %credentials.email, "login succeeded");
                LoginOutcome::success(response.message)
            }
            Ok(response) => {
                tracing::info!(email = %credentials.email, message = %response.message, "login rejected");
                LoginOutcome::failure(response.message)
            }
            Err(e) => {
                tracing::warn!(email = %credentials.email, error = %e, "login failed");
                let message = e.to_string();
                if message.trim().is_empty() {
                    LoginOutcome::failure(CONNECTION_ERROR_MESSAGE)
                } else {
                    LoginOutcome::failure(message)
                }
            }
        }
    }

    /// Clear persisted credentials and reset to an anonymous session.
    pub fn logout(&self) {
        self.auth.logout();
        self.replace(Session::anonymous());
        tracing::info!("logged out");
    }

    pub fn is_login_in_flight(&self) -> bool {
        self.login_in_flight.load(Ordering::Acquire)
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap_or_else(|e| e.into_inner()).is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.snapshot().user
    }

    pub fn user_role(&self) -> Option<Role> {
        self.current_user().map(|u| u.role)
    }

    pub fn user_name(&self) -> String {
        self.snapshot().user_name().to_string()
    }

    fn replace(&self, session: Session) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = session;
    }
}
