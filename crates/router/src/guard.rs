//! Navigation guard.
//!
//! Decides each transition from the session that is already in memory: no IO,
//! no awaiting, same inputs give the same answer. A denial is a redirect
//! value, never an error.

use serde::Serialize;

use rhc_auth::Session;

use crate::rule::RouteAccessRule;
use crate::{HOME_PATH, LOGIN_PATH};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// Route requires a logged-in user.
    NotAuthenticated,
    /// `required_role` did not match exactly.
    RoleMismatch,
    /// Route has a role list but the session has no role.
    MissingRole,
    /// Role not in `required_roles` (compared case-insensitively).
    RoleNotAllowed,
    /// Guest-only route while logged in.
    AlreadyAuthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Redirect { to: String, reason: RedirectReason },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Redirect { to, .. } => Some(to),
        }
    }
}

/// Pre-navigation hook evaluating a route's [`RouteAccessRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGuard {
    login_path: String,
    home_path: String,
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH, HOME_PATH)
    }
}

impl NavigationGuard {
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            home_path: home_path.into(),
        }
    }

    fn redirect(&self, to: &str, reason: RedirectReason) -> GuardDecision {
        GuardDecision::Redirect {
            to: to.to_string(),
            reason,
        }
    }

    /// Evaluate a transition to `target` against `rule`.
    ///
    /// Authentication checks run before the guest check; tables that set
    /// both are rejected when the table is built.
    pub fn check(&self, target: &str, rule: &RouteAccessRule, session: &Session) -> GuardDecision {
        let authenticated = session.is_authenticated();
        let role = session.role();

        let decision = if rule.requires_auth {
            self.check_authenticated(rule, authenticated, role)
        } else {
            None
        }
        .or_else(|| {
            (rule.requires_guest && authenticated)
                .then(|| self.redirect(&self.home_path, RedirectReason::AlreadyAuthenticated))
        })
        .unwrap_or(GuardDecision::Allow);

        tracing::debug!(
            target_path = target,
            role = role.map(|r| r.as_str()),
            required_roles = ?rule.required_roles,
            decision = ?decision,
            "navigation guard"
        );
        decision
    }

    fn check_authenticated(
        &self,
        rule: &RouteAccessRule,
        authenticated: bool,
        role: Option<&rhc_auth::Role>,
    ) -> Option<GuardDecision> {
        if !authenticated {
            return Some(self.redirect(&self.login_path, RedirectReason::NotAuthenticated));
        }

        if let Some(required) = &rule.required_role {
            if role != Some(required) {
                return Some(self.redirect(&self.home_path, RedirectReason::RoleMismatch));
            }
        }

        if let Some(required) = &rule.required_roles {
            let Some(role) = role else {
                return Some(self.redirect(&self.home_path, RedirectReason::MissingRole));
            };
            let current = role.normalized();
            if !required.iter().any(|r| r.normalized() == current) {
                return Some(self.redirect(&self.home_path, RedirectReason::RoleNotAllowed));
            }
        }

        None
    }
}
