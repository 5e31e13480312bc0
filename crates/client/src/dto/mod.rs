//! Wire types exchanged with the backend.
//!
//! Field names follow the backend's camelCase JSON; enumerations use its
//! SCREAMING_SNAKE values. Optional fields the backend may omit are
//! `#[serde(default)]`.

pub mod client;
pub mod client_token;
pub mod employee;
pub mod event;
pub mod health;
pub mod task;
pub mod task_type;
mod timestamp;

use serde::{Deserialize, Serialize};

use rhc_core::{ClientId, DomainError, DomainResult, EmployeeId, UserId};

pub use client::{Client, CreateClientRequest, UpdateClientRequest};
pub use client_token::{
    ClientToken, ClientTokenFilter, CreateClientTokenRequest, RenewClientTokenRequest, UpdateClientTokenRequest,
    ValidateTokenRequest, ValidateTokenResponse,
};
pub use employee::{
    ChangePasswordRequest, ChangePasswordResponse, ChangeUserRoleRequest, ChangeUserRoleResponse,
    CreateEmployeeRequest, Employee, EmployeeRole, UpdateEmployeeRequest,
};
pub use event::{
    CreateEventRequest, Event, EventFilter, EventType, PublicEvent, UpdateEventRequest,
    ValidateTokenWithEventsResponse,
};
pub use health::{DatabaseHealth, HealthCheckResponse, MemoryUsage, PingResponse};
pub use task::{CreateTaskRequest, Task, TaskFilters, TaskPriority, TaskStatus, UpdateTaskRequest};
pub use task_type::{CreateTaskTypeRequest, TaskType, UpdateTaskTypeRequest};

/// Client embedded in another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: ClientId,
    pub business_name: String,
}

/// Employee embedded in another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: EmployeeId,
    pub name: String,
}

/// User (creator) embedded in another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

/// Local checks run on a request body before it is sent.
pub trait Validate {
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }
}

/// `Err` naming `field` when `value` is blank.
pub(crate) fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// List filter with no parameters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NoFilter;

/// Query parameters a list filter contributes to `GET /<resource>`.
pub trait ListFilter: Clone + Default + Send + Sync {
    fn query(&self) -> Vec<(String, String)>;
}

impl ListFilter for NoFilter {
    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
