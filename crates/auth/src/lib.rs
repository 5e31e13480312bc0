//! `rhc-auth`: authentication state and role-based authorization.
//!
//! This crate is decoupled from HTTP and storage: credential persistence and
//! the backend login call are reached through the [`CredentialStore`] and
//! [`AuthService`] traits.

pub mod authorize;
pub mod capability;
pub mod credentials;
pub mod identity;
pub mod policy;
pub mod roles;
pub mod service;
pub mod session;

pub use authorize::{AuthorizationExplanation, AuthzError, authorize, explain_authorization};
pub use capability::Capability;
pub use credentials::{
    CredentialError, CredentialStore, MemoryCredentialStore, StoredCredentials, validate_credentials,
};
pub use identity::UserIdentity;
pub use policy::{Capabilities, HrEmployeeRole, PolicyConfig, RoleCaseMode, RolePolicy};
pub use roles::Role;
pub use service::{AuthService, AuthServiceError, LoginCredentials, LoginResponse};
pub use session::{LoginOutcome, Session, SessionManager};
