//! Client configuration, read from the environment at startup.

use serde::Deserialize;

use rhc_auth::{HrEmployeeRole, PolicyConfig, RoleCaseMode};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    /// Base URL for unauthenticated endpoints; `api_url` when unset.
    pub public_api_url: Option<String>,
    pub policy: PolicyConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            public_api_url: None,
            policy: PolicyConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Read `RHC_API_URL`, `RHC_PUBLIC_API_URL`, `RHC_ROLE_CASE_MODE` and
    /// `RHC_HR_EMPLOYEE_ROLE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("RHC_API_URL").unwrap_or_else(|| {
            tracing::warn!("RHC_API_URL not set; using {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });
        let public_api_url = lookup("RHC_PUBLIC_API_URL").filter(|v| !v.trim().is_empty());

        let role_case = match lookup("RHC_ROLE_CASE_MODE").as_deref().map(str::trim) {
            None | Some("") | Some("legacy") => RoleCaseMode::Legacy,
            Some("insensitive") => RoleCaseMode::Insensitive,
            Some(other) => {
                tracing::warn!(value = other, "unknown RHC_ROLE_CASE_MODE; using legacy");
                RoleCaseMode::Legacy
            }
        };
        let hr_employee_role = match lookup("RHC_HR_EMPLOYEE_ROLE").as_deref().map(str::trim) {
            None | Some("") | Some("legacy") => HrEmployeeRole::Legacy,
            Some("employee") => HrEmployeeRole::Employee,
            Some(other) => {
                tracing::warn!(value = other, "unknown RHC_HR_EMPLOYEE_ROLE; using legacy");
                HrEmployeeRole::Legacy
            }
        };

        Self {
            api_url,
            public_api_url,
            policy: PolicyConfig {
                role_case,
                hr_employee_role,
            },
        }
    }

    pub fn public_api_url(&self) -> &str {
        self.public_api_url.as_deref().unwrap_or(&self.api_url)
    }
}
