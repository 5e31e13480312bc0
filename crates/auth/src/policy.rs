//! Role policy evaluator.
//!
//! Every check here is a pure function of the current role: no IO, no caching,
//! no side effects. Callers recompute whenever the session's role changes.
//!
//! The legacy rules compare most roles by exact case while the employee checks
//! fold case. [`PolicyConfig`] keeps that behavior as the default and exposes
//! the uniform alternatives as opt-in switches.

use serde::{Deserialize, Serialize};

use crate::{Capability, Role};

/// Case handling for role literals other than `employee`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCaseMode {
    /// Exact-case literals (`admin`/`ADMIN` for admin, lowercase elsewhere).
    #[default]
    Legacy,
    /// Every role comparison ignores case.
    Insensitive,
}

/// Which employee literal grants human-resources access.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrEmployeeRole {
    /// The literal `employ`, matched like the other module literals.
    #[default]
    Legacy,
    /// Any casing of `employee`.
    Employee,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub role_case: RoleCaseMode,
    pub hr_employee_role: HrEmployeeRole,
}

/// Snapshot of every capability for one role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub is_admin: bool,
    pub is_employee: bool,
    pub can_access_financiero: bool,
    pub can_access_operativo: bool,
    pub can_access_producto: bool,
    pub can_access_recursos_humanos: bool,
    pub can_delete_events: bool,
    pub can_delete_tasks: bool,
    pub can_delete_clients: bool,
    pub can_manage_employees: bool,
    pub can_view_tokens: bool,
    pub can_view_token_details: bool,
    pub can_delete_tokens: bool,
}

impl Capabilities {
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::Financial => self.can_access_financiero,
            Capability::Operational => self.can_access_operativo,
            Capability::Product => self.can_access_producto,
            Capability::HumanResources => self.can_access_recursos_humanos,
            Capability::DeleteEvents => self.can_delete_events,
            Capability::DeleteTasks => self.can_delete_tasks,
            Capability::DeleteClients => self.can_delete_clients,
            Capability::ManageEmployees => self.can_manage_employees,
            Capability::ViewTokens => self.can_view_tokens,
            Capability::ViewTokenDetails => self.can_view_token_details,
            Capability::DeleteTokens => self.can_delete_tokens,
        }
    }

    /// Capabilities that evaluated to `true`, in declaration order.
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.get(*c))
            .collect()
    }
}

/// Maps the current role to allow/deny for each [`Capability`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RolePolicy {
    config: PolicyConfig,
}

const ADMIN_LITERALS: [&str; 2] = ["admin", "ADMIN"];
const MODULE_LITERALS: [&str; 2] = ["admin", "supervisor"];
const LEGACY_HR_LITERALS: [&str; 3] = ["admin", "supervisor", "employ"];

impl RolePolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// The behavior the application shipped with.
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Case-insensitive comparisons everywhere and `employee` for HR access.
    pub fn uniform() -> Self {
        Self::new(PolicyConfig {
            role_case: RoleCaseMode::Insensitive,
            hr_employee_role: HrEmployeeRole::Employee,
        })
    }

    pub fn config(&self) -> PolicyConfig {
        self.config
    }

    fn matches(&self, role: &Role, literal: &str) -> bool {
        match self.config.role_case {
            RoleCaseMode::Legacy => role.as_str() == literal,
            RoleCaseMode::Insensitive => role.eq_ignore_case(literal),
        }
    }

    fn matches_any(&self, role: Option<&Role>, literals: &[&str]) -> bool {
        role.is_some_and(|r| literals.iter().any(|l| self.matches(r, l)))
    }

    pub fn is_admin(&self, role: Option<&Role>) -> bool {
        self.matches_any(role, &ADMIN_LITERALS)
    }

    /// Employee detection always folds case: the backend sends `EMPLOYEE`.
    pub fn is_employee(&self, role: Option<&Role>) -> bool {
        role.is_some_and(|r| r.eq_ignore_case(Role::EMPLOYEE.as_str()))
    }

    pub fn has_role(&self, role: Option<&Role>, expected: &str) -> bool {
        self.matches_any(role, &[expected])
    }

    pub fn can_access_financiero(&self, role: Option<&Role>) -> bool {
        self.is_admin(role)
    }

    pub fn can_access_operativo(&self, role: Option<&Role>) -> bool {
        self.matches_any(role, &MODULE_LITERALS)
    }

    pub fn can_access_producto(&self, role: Option<&Role>) -> bool {
        self.matches_any(role, &MODULE_LITERALS)
    }

    pub fn can_access_recursos_humanos(&self, role: Option<&Role>) -> bool {
        match self.config.hr_employee_role {
            HrEmployeeRole::Legacy => self.matches_any(role, &LEGACY_HR_LITERALS),
            HrEmployeeRole::Employee => {
                self.matches_any(role, &MODULE_LITERALS) || self.is_employee(role)
            }
        }
    }

    /// Shared rule behind the seven destructive/token capabilities.
    ///
    /// An absent role is not an employee, so these evaluate to `true` before
    /// login; route guards are what keep anonymous users out.
    pub fn is_not_employee(&self, role: Option<&Role>) -> bool {
        !self.is_employee(role)
    }

    pub fn allows(&self, role: Option<&Role>, capability: Capability) -> bool {
        match capability {
            Capability::Financial => self.can_access_financiero(role),
            Capability::Operational => self.can_access_operativo(role),
            Capability::Product => self.can_access_producto(role),
            Capability::HumanResources => self.can_access_recursos_humanos(role),
            Capability::DeleteEvents
            | Capability::DeleteTasks
            | Capability::DeleteClients
            | Capability::ManageEmployees
            | Capability::ViewTokens
            | Capability::ViewTokenDetails
            | Capability::DeleteTokens => self.is_not_employee(role),
        }
    }

    pub fn evaluate(&self, role: Option<&Role>) -> Capabilities {
        let not_employee = self.is_not_employee(role);
        Capabilities {
            is_admin: self.is_admin(role),
            is_employee: !not_employee,
            can_access_financiero: self.can_access_financiero(role),
            can_access_operativo: self.can_access_operativo(role),
            can_access_producto: self.can_access_producto(role),
            can_access_recursos_humanos: self.can_access_recursos_humanos(role),
            can_delete_events: not_employee,
            can_delete_tasks: not_employee,
            can_delete_clients: not_employee,
            can_manage_employees: not_employee,
            can_view_tokens: not_employee,
            can_view_token_details: not_employee,
            can_delete_tokens: not_employee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn role(s: &str) -> Role {
        Role::new(s.to_string())
    }

    #[test]
    fn admin_is_two_literal_match() {
        let policy = RolePolicy::legacy();
        assert!(policy.is_admin(Some(&role("admin"))));
        assert!(policy.is_admin(Some(&role("ADMIN"))));
        assert!(!policy.is_admin(Some(&role("Admin"))));
        assert!(!policy.is_admin(None));
    }

    #[test]
    fn employee_detection_folds_case() {
        let policy = RolePolicy::legacy();
        for r in ["employee", "Employee", "EMPLOYEE", "eMpLoYeE"] {
            assert!(policy.is_employee(Some(&role(r))), "{r}");
        }
        assert!(!policy.is_employee(Some(&role("employ"))));
        assert!(!policy.is_employee(None));
    }

    #[test]
    fn module_access_uses_exact_literals() {
        let policy = RolePolicy::legacy();
        assert!(policy.can_access_operativo(Some(&role("supervisor"))));
        assert!(policy.can_access_producto(Some(&role("admin"))));
        assert!(!policy.can_access_operativo(Some(&role("ADMIN"))));
        assert!(!policy.can_access_producto(Some(&role("SUPERVISOR"))));
        assert!(!policy.can_access_operativo(None));
    }

    #[test]
    fn legacy_hr_access_accepts_employ_not_employee() {
        let policy = RolePolicy::legacy();
        assert!(policy.can_access_recursos_humanos(Some(&role("employ"))));
        assert!(policy.can_access_recursos_humanos(Some(&role("supervisor"))));
        assert!(!policy.can_access_recursos_humanos(Some(&role("employee"))));
        assert!(!policy.can_access_recursos_humanos(Some(&role("EMPLOYEE"))));
    }

    #[test]
    fn uniform_policy_folds_every_comparison() {
        let policy = RolePolicy::uniform();
        assert!(policy.is_admin(Some(&role("Admin"))));
        assert!(policy.can_access_operativo(Some(&role("SUPERVISOR"))));
        assert!(policy.has_role(Some(&role("Supervisor")), "supervisor"));
        assert!(policy.can_access_recursos_humanos(Some(&role("EMPLOYEE"))));
        assert!(!policy.can_access_recursos_humanos(Some(&role("employ"))));
    }

    #[test]
    fn has_role_is_exact_in_legacy_mode() {
        let policy = RolePolicy::legacy();
        assert!(policy.has_role(Some(&role("supervisor")), "supervisor"));
        assert!(!policy.has_role(Some(&role("Supervisor")), "supervisor"));
        assert!(!policy.has_role(None, "supervisor"));
    }

    #[test]
    fn anonymous_role_keeps_non_employee_gates_open() {
        let caps = RolePolicy::legacy().evaluate(None);
        assert!(!caps.is_admin);
        assert!(!caps.is_employee);
        assert!(caps.can_delete_tasks);
        assert!(!caps.can_access_financiero);
    }

    #[test]
    fn evaluate_agrees_with_allows() {
        let policy = RolePolicy::legacy();
        for r in ["admin", "ADMIN", "supervisor", "employee", "EMPLOYEE", "employ", "guest"] {
            let current = role(r);
            let caps = policy.evaluate(Some(&current));
            for cap in Capability::ALL {
                assert_eq!(caps.get(cap), policy.allows(Some(&current), cap), "{r} / {cap}");
            }
        }
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: PolicyConfig = serde_json::from_str(r#"{"role_case":"insensitive"}"#).unwrap();
        assert_eq!(config.role_case, RoleCaseMode::Insensitive);
        assert_eq!(config.hr_employee_role, HrEmployeeRole::Legacy);
    }

    fn any_casing(word: &'static str) -> impl Strategy<Value = String> {
        prop::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
            word.chars()
                .zip(upper)
                .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn employee_matches_lowercase_comparison(r in "[a-zA-Z]{0,10}") {
            let policy = RolePolicy::legacy();
            prop_assert_eq!(policy.is_employee(Some(&role(&r))), r.to_lowercase() == "employee");
        }

        #[test]
        fn every_casing_of_employee_is_an_employee(r in any_casing("employee")) {
            let policy = RolePolicy::legacy();
            prop_assert!(policy.is_employee(Some(&role(&r))));
        }

        #[test]
        fn non_employee_gates_flip_together(r in prop_oneof![any_casing("employee"), "[a-zA-Z]{0,10}"]) {
            let policy = RolePolicy::legacy();
            let current = role(&r);
            let caps = policy.evaluate(Some(&current));
            for cap in Capability::ALL.into_iter().filter(|c| c.is_non_employee_gate()) {
                prop_assert_eq!(caps.get(cap), !caps.is_employee);
            }
        }

        #[test]
        fn admin_only_for_two_literals(r in "[a-zA-Z]{0,8}") {
            let policy = RolePolicy::legacy();
            let current = role(&r);
            let expected = r == "admin" || r == "ADMIN";
            prop_assert_eq!(policy.is_admin(Some(&current)), expected);
            prop_assert_eq!(policy.can_access_financiero(Some(&current)), expected);
        }
    }
}
