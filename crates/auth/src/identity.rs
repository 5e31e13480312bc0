use serde::{Deserialize, Serialize};

use rhc_core::UserId;

use crate::Role;

/// Identity of the logged-in user as returned by the backend.
///
/// Only `name` and `role` are relied upon; the remaining fields are kept when
/// the backend sends them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}

impl UserIdentity {
    pub fn new(name: impl Into<String>, role: impl Into<Role>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: None,
            role: role.into(),
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
