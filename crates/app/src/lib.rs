//! `rhc-app`: wiring for the RHC access-control tooling.
//!
//! [`inspect`] evaluates one role against the capability policy and the
//! standard route table without touching the backend.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use rhc_auth::{
    AuthorizationExplanation, Capabilities, Capability, PolicyConfig, Role, RolePolicy, Session, UserIdentity,
    explain_authorization,
};
use rhc_router::{Navigation, Router};

/// Command-line spelling of "no session".
pub const ANONYMOUS: &str = "-";

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub role: Option<String>,
    pub authenticated: bool,
    pub policy: PolicyConfig,
    pub capabilities: Capabilities,
    pub explanations: Vec<AuthorizationExplanation>,
    pub navigations: Vec<PathReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PathReport {
    Resolved(Navigation),
    Failed { path: String, error: String },
}

/// Session for a role argument: `-` (or nothing) is anonymous, anything else
/// is a logged-in user holding that role.
pub fn session_for(role: Option<&str>) -> Session {
    match role.map(str::trim) {
        None | Some(ANONYMOUS) | Some("") => Session::anonymous(),
        Some(role) => Session::authenticated(Some(UserIdentity::new("inspect", Role::from(role.to_string())))),
    }
}

/// Evaluate `role` and navigate to each path as that session.
pub fn inspect(policy: PolicyConfig, role: Option<&str>, paths: &[String]) -> anyhow::Result<InspectReport> {
    let session = session_for(role);
    let evaluator = RolePolicy::new(policy);
    let current = session.role();

    let router = Router::standard(Arc::new(session.clone())).context("standard route table is invalid")?;

    let navigations = paths
        .iter()
        .map(|path| match router.navigate(path) {
            Ok(nav) => PathReport::Resolved(nav),
            Err(err) => PathReport::Failed {
                path: path.clone(),
                error: err.to_string(),
            },
        })
        .collect();

    Ok(InspectReport {
        role: current.map(|r| r.as_str().to_string()),
        authenticated: session.is_authenticated(),
        policy,
        capabilities: evaluator.evaluate(current),
        explanations: Capability::ALL
            .iter()
            .map(|cap| explain_authorization(&evaluator, current, *cap))
            .collect(),
        navigations,
    })
}

#[cfg(test)]
mod tests {
    use rhc_auth::{HrEmployeeRole, RoleCaseMode};

    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn landed(report: &InspectReport) -> Vec<String> {
        report
            .navigations
            .iter()
            .map(|n| match n {
                PathReport::Resolved(nav) => nav.path.clone(),
                PathReport::Failed { error, .. } => error.clone(),
            })
            .collect()
    }

    #[test]
    fn anonymous_report() {
        let report = inspect(PolicyConfig::default(), Some("-"), &paths(&["/admin", "/calendario"])).unwrap();
        assert!(!report.authenticated);
        assert_eq!(report.role, None);
        assert!(!report.capabilities.can_access_financiero);
        // gates only exclude employees; routes keep anonymous users out
        assert!(report.capabilities.can_delete_clients);
        assert_eq!(landed(&report), ["/login", "/calendario"]);
    }

    #[test]
    fn employee_report() {
        let report = inspect(PolicyConfig::default(), Some("EMPLOYEE"), &paths(&["/admin", "/login"])).unwrap();
        assert!(report.capabilities.is_employee);
        assert!(!report.capabilities.can_delete_clients);
        assert_eq!(report.explanations.len(), Capability::ALL.len());
        assert_eq!(landed(&report), ["/admin", "/"]);
    }

    #[test]
    fn uniform_policy_changes_capabilities() {
        let uniform = PolicyConfig {
            role_case: RoleCaseMode::Insensitive,
            hr_employee_role: HrEmployeeRole::Employee,
        };
        let legacy = inspect(PolicyConfig::default(), Some("Supervisor"), &[]).unwrap();
        let folded = inspect(uniform, Some("Supervisor"), &[]).unwrap();
        assert!(!legacy.capabilities.can_access_operativo);
        assert!(folded.capabilities.can_access_operativo);
    }

    #[test]
    fn report_serializes() {
        let report = inspect(PolicyConfig::default(), Some("admin"), &paths(&["/acceso-rhc"])).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["navigations"][0]["outcome"], "resolved");
        assert_eq!(json["navigations"][0]["path"], "/acceso-rhc");
    }
}
