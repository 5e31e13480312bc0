use serde::{Deserialize, Serialize};

/// Named permission gate evaluated against the current role.
///
/// The set is fixed: each variant maps to one UI-facing permission of the
/// application (module access or a destructive action).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Financial module.
    Financial,
    /// Operational module.
    Operational,
    /// Product module.
    Product,
    /// Human resources module.
    HumanResources,
    DeleteEvents,
    DeleteTasks,
    DeleteClients,
    /// Create, edit and delete employees.
    ManageEmployees,
    ViewTokens,
    ViewTokenDetails,
    DeleteTokens,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::Financial,
        Capability::Operational,
        Capability::Product,
        Capability::HumanResources,
        Capability::DeleteEvents,
        Capability::DeleteTasks,
        Capability::DeleteClients,
        Capability::ManageEmployees,
        Capability::ViewTokens,
        Capability::ViewTokenDetails,
        Capability::DeleteTokens,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Financial => "financial",
            Capability::Operational => "operational",
            Capability::Product => "product",
            Capability::HumanResources => "human_resources",
            Capability::DeleteEvents => "delete_events",
            Capability::DeleteTasks => "delete_tasks",
            Capability::DeleteClients => "delete_clients",
            Capability::ManageEmployees => "manage_employees",
            Capability::ViewTokens => "view_tokens",
            Capability::ViewTokenDetails => "view_token_details",
            Capability::DeleteTokens => "delete_tokens",
        }
    }

    /// Capabilities granted to every role except employees.
    pub fn is_non_employee_gate(&self) -> bool {
        matches!(
            self,
            Capability::DeleteEvents
                | Capability::DeleteTasks
                | Capability::DeleteClients
                | Capability::ManageEmployees
                | Capability::ViewTokens
                | Capability::ViewTokenDetails
                | Capability::DeleteTokens
        )
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
