use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rhc_core::{ClientId, DomainError, DomainResult, EmployeeId, Entity, EventId, UserId};

use super::{ClientRef, EmployeeRef, ListFilter, UserRef, Validate, require};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Meeting,
    Deadline,
    Reminder,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "super::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub end_date: DateTime<Utc>,
    pub event_type: EventType,
    pub is_private: bool,
    #[serde(default)]
    pub client_ids: Option<Vec<ClientId>>,
    #[serde(default)]
    pub employee_ids: Option<Vec<EmployeeId>>,
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
    pub creator: Option<UserRef>,
}

impl Entity for Event {
    type Id = EventId;

    fn id(&self) -> EventId {
        self.id
    }
}

/// Event as exposed by the unauthenticated endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "super::timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "super::timestamp")]
    pub end_date: DateTime<Utc>,
    pub event_type: EventType,
    pub is_private: bool,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<ClientId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<EmployeeId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ids: Option<Vec<ClientId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_ids: Option<Vec<EmployeeId>>,
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<()> {
    if end < start {
        return Err(DomainError::validation("end date precedes start date"));
    }
    Ok(())
}

impl Validate for CreateEventRequest {
    fn validate(&self) -> DomainResult<()> {
        require("title", &self.title)?;
        check_window(self.start_date, self.end_date)
    }
}

/// Only checks the window when both ends change together.
impl Validate for UpdateEventRequest {
    fn validate(&self) -> DomainResult<()> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => check_window(start, end),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub client_id: Option<ClientId>,
    /// Only public events.
    pub public: bool,
}

impl ListFilter for EventFilter {
    fn query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(client_id) = self.client_id {
            params.push(("clientId".to_string(), client_id.to_string()));
        }
        if self.public {
            params.push(("public".to_string(), "true".to_string()));
        }
        params
    }
}

/// Result of validating a client access token on the public calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenWithEventsResponse {
    pub token_validation: TokenValidation,
    pub client_data: ClientEventCounts,
    pub events: PartitionedEvents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidation {
    pub is_valid: bool,
    pub client_id: ClientId,
    #[serde(with = "super::timestamp")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEventCounts {
    pub client_id: ClientId,
    pub total_events: u32,
    pub public_events: u32,
    pub private_events: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionedEvents {
    #[serde(default)]
    pub public: Vec<PublicEvent>,
    #[serde(default)]
    pub private: Vec<PublicEvent>,
}
