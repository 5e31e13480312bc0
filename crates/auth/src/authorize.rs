use serde::Serialize;
use thiserror::Error;

use crate::{Capability, Role, RolePolicy};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden: missing capability '{0}'")]
    Forbidden(Capability),
}

/// Check one capability for the current role.
///
/// - No IO
/// - No panics
/// - Same answer as [`RolePolicy::allows`]
pub fn authorize(
    policy: &RolePolicy,
    role: Option<&Role>,
    capability: Capability,
) -> Result<(), AuthzError> {
    if policy.allows(role, capability) {
        return Ok(());
    }
    match role {
        None => Err(AuthzError::Unauthenticated),
        Some(_) => Err(AuthzError::Forbidden(capability)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Roles the application knows about, used to suggest what would grant access.
const KNOWN_ROLES: [&str; 6] = ["admin", "ADMIN", "supervisor", "employee", "EMPLOYEE", "employ"];

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub capability: Capability,

    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    pub role: RoleState,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,
}

/// How the evaluator saw the role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleState {
    pub role: Option<String>,
    pub normalized: Option<String>,
    pub is_admin: bool,
    pub is_employee: bool,
    pub granted_capabilities: Vec<Capability>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    /// Known role values that would be granted this capability.
    pub granting_roles: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoRole,
    EmployeeRestricted,
    RoleNotPermitted,
}

/// Explain why a capability is (or would be) granted or denied.
pub fn explain_authorization(
    policy: &RolePolicy,
    role: Option<&Role>,
    capability: Capability,
) -> AuthorizationExplanation {
    let caps = policy.evaluate(role);
    let granted = caps.get(capability);
    let state = RoleState {
        role: role.map(|r| r.as_str().to_string()),
        normalized: role.map(Role::normalized),
        is_admin: caps.is_admin,
        is_employee: caps.is_employee,
        granted_capabilities: caps.granted(),
    };

    if granted {
        let reason = match role {
            Some(r) if capability.is_non_employee_gate() => {
                format!("Role '{r}' is not an employee role")
            }
            Some(r) => format!("Role '{r}' is permitted '{capability}'"),
            None => format!("'{capability}' is open to sessions without a role"),
        };
        return AuthorizationExplanation {
            capability,
            granted: true,
            reason,
            role: state,
            denial_reason: None,
        };
    }

    let granting_roles: Vec<String> = KNOWN_ROLES
        .iter()
        .filter(|r| policy.allows(Some(&Role::new(**r)), capability))
        .map(|r| r.to_string())
        .collect();

    let (kind, message) = match role {
        None => (
            DenialKind::NoRole,
            "No role is available for the current session".to_string(),
        ),
        Some(r) if capability.is_non_employee_gate() => (
            DenialKind::EmployeeRestricted,
            format!("Role '{r}' is an employee role; '{capability}' is restricted to other roles"),
        ),
        Some(r) => (
            DenialKind::RoleNotPermitted,
            format!("Role '{r}' is not permitted '{capability}'"),
        ),
    };

    let mut suggestions = Vec::new();
    if role.is_none() {
        suggestions.push("Log in with an account that has a role".to_string());
    }
    if !granting_roles.is_empty() {
        suggestions.push(format!(
            "Use an account with one of the roles: {}",
            granting_roles.join(", ")
        ));
    }
    if let Some(r) = role {
        let folded = RolePolicy::uniform().allows(Some(r), capability);
        if folded && !policy.allows(Some(r), capability) {
            suggestions.push(format!(
                "Role '{r}' differs only by case or spelling from a permitted role; the uniform role policy would grant it"
            ));
        }
    }

    AuthorizationExplanation {
        capability,
        granted: false,
        reason: message.clone(),
        role: state,
        denial_reason: Some(DenialReason {
            kind,
            message,
            granting_roles,
            suggestions,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_matches_policy() {
        let policy = RolePolicy::legacy();
        let admin = Role::new("ADMIN");
        assert_eq!(authorize(&policy, Some(&admin), Capability::Financial), Ok(()));

        let employee = Role::new("Employee");
        assert_eq!(
            authorize(&policy, Some(&employee), Capability::DeleteTasks),
            Err(AuthzError::Forbidden(Capability::DeleteTasks))
        );
    }

    #[test]
    fn missing_role_is_unauthenticated() {
        let policy = RolePolicy::legacy();
        assert_eq!(
            authorize(&policy, None, Capability::Operational),
            Err(AuthzError::Unauthenticated)
        );
        // Non-employee gates stay open without a role.
        assert_eq!(authorize(&policy, None, Capability::ViewTokens), Ok(()));
    }

    #[test]
    fn explains_employee_restriction() {
        let policy = RolePolicy::legacy();
        let role = Role::new("EMPLOYEE");
        let explanation = explain_authorization(&policy, Some(&role), Capability::DeleteClients);

        assert!(!explanation.granted);
        assert!(explanation.role.is_employee);
        let denial = explanation.denial_reason.unwrap();
        assert_eq!(denial.kind, DenialKind::EmployeeRestricted);
        assert!(denial.granting_roles.contains(&"admin".to_string()));
        assert!(!denial.granting_roles.contains(&"employee".to_string()));
    }

    #[test]
    fn explains_case_mismatch_with_suggestion() {
        let policy = RolePolicy::legacy();
        let role = Role::new("Supervisor");
        let explanation = explain_authorization(&policy, Some(&role), Capability::Operational);

        assert!(!explanation.granted);
        let denial = explanation.denial_reason.unwrap();
        assert_eq!(denial.kind, DenialKind::RoleNotPermitted);
        assert!(denial.suggestions.iter().any(|s| s.contains("uniform role policy")));
    }

    #[test]
    fn explains_grant() {
        let policy = RolePolicy::legacy();
        let role = Role::new("admin");
        let explanation = explain_authorization(&policy, Some(&role), Capability::Product);

        assert!(explanation.granted);
        assert!(explanation.denial_reason.is_none());
        assert!(explanation.role.granted_capabilities.contains(&Capability::Product));
        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["capability"], "product");
    }
}
