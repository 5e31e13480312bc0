use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles arrive from the backend as free-form strings whose casing is not
/// stable (`"admin"`, `"ADMIN"`, `"Employee"`). The raw value is kept as-is;
/// callers decide whether a comparison is exact or case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const SUPERVISOR: Role = Role(Cow::Borrowed("supervisor"));
    pub const EMPLOYEE: Role = Role(Cow::Borrowed("employee"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for case-insensitive matching.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.normalized() == other.to_lowercase()
    }
}

impl PartialEq<str> for Role {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Role {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_comparison_keeps_case() {
        let role = Role::new("ADMIN");
        assert!(role == "ADMIN");
        assert!(role != "admin");
    }

    #[test]
    fn case_insensitive_comparison() {
        let role = Role::new("Employee");
        assert!(role.eq_ignore_case("EMPLOYEE"));
        assert_eq!(role.normalized(), "employee");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let role: Role = serde_json::from_str("\"supervisor\"").unwrap();
        assert_eq!(role, Role::SUPERVISOR);
    }
}
