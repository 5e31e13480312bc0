use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rhc_core::{ClientId, DomainError, DomainResult, EmployeeId, Entity, EventId, TaskId, TaskTypeId, UserId};

use super::event::EventType;
use super::{ClientRef, EmployeeRef, ListFilter, UserRef, Validate, require};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Urgent => "URGENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(with = "super::timestamp")]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "super::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub clients: Option<Vec<ClientRef>>,
    #[serde(default)]
    pub employees: Option<Vec<EmployeeRef>>,
    #[serde(default)]
    pub client_ids: Option<Vec<ClientId>>,
    #[serde(default)]
    pub employee_ids: Option<Vec<EmployeeId>>,
    #[serde(default)]
    pub task_type_id: Option<TaskTypeId>,
    #[serde(default)]
    pub event_id: Option<EventId>,
    #[serde(default)]
    pub task_type: Option<TaskTypeRef>,
    #[serde(default)]
    pub event: Option<EventRef>,
    #[serde(default)]
    pub creator: Option<UserRef>,
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> TaskId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTypeRef {
    pub id: TaskTypeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRef {
    pub id: EventId,
    pub title: String,
    #[serde(with = "super::timestamp")]
    pub start_date: DateTime<Utc>,
    pub event_type: EventType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backend defaults to `PENDING`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<ClientId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<EmployeeId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type_id: Option<TaskTypeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<ClientId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<EmployeeId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type_id: Option<TaskTypeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
}

fn check_hours(field: &str, hours: Option<f64>) -> DomainResult<()> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => Err(DomainError::validation(format!("{field} must not be negative"))),
        _ => Ok(()),
    }
}

impl Validate for CreateTaskRequest {
    fn validate(&self) -> DomainResult<()> {
        require("title", &self.title)?;
        check_hours("estimated hours", self.estimated_hours)?;
        check_hours("actual hours", self.actual_hours)
    }
}

impl Validate for UpdateTaskRequest {
    fn validate(&self) -> DomainResult<()> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        check_hours("estimated hours", self.estimated_hours)?;
        check_hours("actual hours", self.actual_hours)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub client_id: Option<ClientId>,
    pub employee_id: Option<EmployeeId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub task_type_id: Option<TaskTypeId>,
}

impl ListFilter for TaskFilters {
    fn query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.client_id {
            params.push(("clientId".to_string(), id.to_string()));
        }
        if let Some(id) = self.employee_id {
            params.push(("employeeId".to_string(), id.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority".to_string(), priority.as_str().to_string()));
        }
        if let Some(id) = self.task_type_id {
            params.push(("taskTypeId".to_string(), id.to_string()));
        }
        params
    }
}
