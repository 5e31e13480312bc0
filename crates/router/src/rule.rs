use serde::{Deserialize, Serialize};
use thiserror::Error;

use rhc_auth::Role;

/// Access requirements attached to a route definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteAccessRule {
    pub requires_auth: bool,

    /// Only reachable while logged out (e.g. the login view).
    pub requires_guest: bool,

    /// Exact-case role match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Role>,

    /// Case-insensitive role list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_roles: Option<Vec<Role>>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    #[error("route '{0}' requires both an authenticated user and a guest")]
    ConflictingRequirements(String),

    #[error("route '{0}' declares roles without requiring authentication")]
    RoleWithoutAuth(String),

    #[error("route '{0}' declares an empty role list")]
    EmptyRoleList(String),

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("route '{name}' redirects to '{target}', which does not resolve to a view")]
    DanglingRedirect { name: String, target: String },

    #[error("malformed route table: {0}")]
    Malformed(String),

    #[error("route '{shadowed}' can never match: catch-all route '{catch_all}' is declared before it")]
    ShadowedRoute { catch_all: String, shadowed: String },
}

impl RouteAccessRule {
    /// No requirements.
    pub fn public() -> Self {
        Self::default()
    }

    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            ..Self::default()
        }
    }

    pub fn guest_only() -> Self {
        Self {
            requires_guest: true,
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.required_role = Some(role.into());
        self
    }

    pub fn with_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.required_roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_public(&self) -> bool {
        !self.requires_auth && !self.requires_guest
    }

    /// Reject rule combinations whose outcome would depend on check order or
    /// that the guard would silently ignore.
    pub fn validate(&self, route: &str) -> Result<(), RouteConfigError> {
        if self.requires_auth && self.requires_guest {
            return Err(RouteConfigError::ConflictingRequirements(route.to_string()));
        }
        let has_roles = self.required_role.is_some() || self.required_roles.is_some();
        if has_roles && !self.requires_auth {
            return Err(RouteConfigError::RoleWithoutAuth(route.to_string()));
        }
        if self.required_roles.as_ref().is_some_and(|r| r.is_empty()) {
            return Err(RouteConfigError::EmptyRoleList(route.to_string()));
        }
        Ok(())
    }
}
