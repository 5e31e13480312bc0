//! Cached lists over [`ResourceService`]s.
//!
//! A store never returns an error: failures land in [`ResourceStore::error`]
//! as display text and the call yields `None` or `false`. `loading` is set
//! for the duration of every call.

mod client_tokens;
mod employees;
mod events;
mod task_types;

use rhc_core::Entity;

use crate::error::ApiError;
use crate::resource::{AfterMutation, IdOf, Resource};
use crate::services::ResourceService;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Operation {
    Load,
    LoadPublic,
    Get,
    Create,
    Update,
    Delete,
    ToggleActive,
    Renew,
    Validate,
    ChangePassword,
    ChangeRole,
}

impl Operation {
    fn describe(self, singular: &str, plural: &str) -> String {
        match self {
            Operation::Load => format!("load {plural}"),
            Operation::LoadPublic => format!("load public {plural}"),
            Operation::Get => format!("get {singular}"),
            Operation::Create => format!("create {singular}"),
            Operation::Update => format!("update {singular}"),
            Operation::Delete => format!("delete {singular}"),
            Operation::ToggleActive => format!("change {singular} status"),
            Operation::Renew => format!("renew {singular}"),
            Operation::Validate => format!("validate {singular}"),
            Operation::ChangePassword => format!("change {singular} password"),
            Operation::ChangeRole => format!("change {singular} role"),
        }
    }
}

pub struct ResourceStore<R: Resource> {
    service: ResourceService<R>,
    items: Vec<R::Entity>,
    loading: bool,
    error: Option<String>,
    filter: R::Filter,
    pub(crate) extra: R::Extra,
}

impl<R: Resource> core::fmt::Debug for ResourceStore<R>
where
    R::Entity: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("items", &self.items)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(service: ResourceService<R>) -> Self {
        Self {
            service,
            items: Vec::new(),
            loading: false,
            error: None,
            filter: R::Filter::default(),
            extra: R::Extra::default(),
        }
    }

    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Filter used by the last load; refetches reuse it.
    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn service(&self) -> &ResourceService<R> {
        &self.service
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record a failure and end the call.
    pub(crate) fn fail(&mut self, operation: Operation, err: ApiError) {
        let message = format!("failed to {}: {err}", operation.describe(R::SINGULAR, R::PLURAL));
        tracing::warn!(resource = R::PATH, error = %err, "{message}");
        self.error = Some(message);
        self.loading = false;
    }

    /// End a call: the value on success, `None` after recording the failure.
    pub(crate) fn settle<T>(&mut self, operation: Operation, result: Result<T, ApiError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.loading = false;
                Some(value)
            }
            Err(err) => {
                self.fail(operation, err);
                None
            }
        }
    }

    async fn reload(&mut self) {
        match self.service.list(&self.filter).await {
            Ok(items) => self.items = items,
            Err(err) => self.fail(Operation::Load, err),
        }
    }

    /// Replace a cached entity, or reload, per the resource's policy.
    pub(crate) async fn apply_updated(&mut self, updated: &R::Entity) {
        match R::AFTER_MUTATION {
            AfterMutation::Patch => {
                let id = updated.id();
                if let Some(slot) = self.items.iter_mut().find(|item| item.id() == id) {
                    *slot = updated.clone();
                }
            }
            AfterMutation::Refetch => self.reload().await,
        }
    }

    /// Load the list with `filter` and remember it.
    pub async fn fetch(&mut self, filter: R::Filter) -> bool {
        self.filter = filter;
        self.refresh().await
    }

    /// Reload with the remembered filter.
    pub async fn refresh(&mut self) -> bool {
        self.begin();
        self.reload().await;
        self.loading = false;
        self.error.is_none()
    }

    /// Fetch one entity without touching the cached list.
    pub async fn get(&mut self, id: IdOf<R>) -> Option<R::Entity> {
        self.begin();
        let result = self.service.get(id).await;
        self.settle(Operation::Get, result)
    }

    pub async fn create(&mut self, body: &R::Create) -> Option<R::Entity> {
        self.begin();
        let result = self.service.create(body).await;
        let created = self.settle(Operation::Create, result)?;
        match R::AFTER_MUTATION {
            AfterMutation::Patch if R::PREPEND_CREATED => self.items.insert(0, created.clone()),
            AfterMutation::Patch => self.items.push(created.clone()),
            AfterMutation::Refetch => self.reload().await,
        }
        self.loading = false;
        Some(created)
    }

    pub async fn update(&mut self, id: IdOf<R>, body: &R::Update) -> Option<R::Entity> {
        self.begin();
        let result = self.service.update(id, body).await;
        let updated = self.settle(Operation::Update, result)?;
        self.apply_updated(&updated).await;
        self.loading = false;
        Some(updated)
    }

    pub async fn delete(&mut self, id: IdOf<R>) -> bool {
        self.begin();
        let result = self.service.delete(id).await;
        if self.settle(Operation::Delete, result).is_none() {
            return false;
        }
        match R::AFTER_MUTATION {
            AfterMutation::Patch => self.items.retain(|item| item.id() != id),
            AfterMutation::Refetch => self.reload().await,
        }
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use chrono::{TimeZone, Utc};
    use rhc_core::{ClientId, TaskId};

    use super::*;
    use crate::dto::{CreateClientRequest, CreateTaskRequest, NoFilter, TaskFilters, TaskPriority, UpdateClientRequest};
    use crate::resource::{Clients, Tasks};
    use crate::testing::ScriptedTransport;

    fn client_json(id: i64, name: &str) -> serde_json::Value {
        json!({"id": id, "businessName": name, "phone": "555"})
    }

    fn store(responses: Vec<Result<serde_json::Value, ApiError>>) -> (ResourceStore<Clients>, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        (ResourceStore::new(ResourceService::new(transport.clone())), transport)
    }

    #[tokio::test]
    async fn patches_local_list_after_mutations() {
        let (mut store, transport) = store(vec![
            Ok(json!([client_json(1, "Acme"), client_json(2, "Globex")])),
            Ok(client_json(3, "Initech")),
            Ok(client_json(1, "Acme Ltd")),
            Ok(serde_json::Value::Null),
        ]);

        assert!(store.fetch(NoFilter).await);
        let created = store
            .create(&CreateClientRequest {
                business_name: "Initech".to_string(),
                phone: "555".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, ClientId::new(3));

        store
            .update(ClientId::new(1), &UpdateClientRequest {
                business_name: Some("Acme Ltd".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(store.delete(ClientId::new(2)).await);

        let names: Vec<_> = store.items().iter().map(|c| c.business_name.as_str()).collect();
        assert_eq!(names, ["Acme Ltd", "Initech"]);
        assert!(!store.loading());
        assert_eq!(store.error(), None);
        // one list call only: patching never refetches
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn failure_sets_error_and_keeps_items() {
        let (mut store, _) = store(vec![
            Ok(json!([client_json(1, "Acme")])),
            Err(ApiError::from_response(403, r#"{"message":"Forbidden"}"#)),
        ]);

        store.fetch(NoFilter).await;
        assert!(!store.delete(ClientId::new(1)).await);
        assert_eq!(store.error(), Some("failed to delete client: Forbidden"));
        assert_eq!(store.items().len(), 1);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn next_call_clears_previous_error() {
        let (mut store, _) = store(vec![
            Err(ApiError::Network("connection refused".to_string())),
            Ok(json!([])),
        ]);

        assert!(!store.refresh().await);
        assert_eq!(
            store.error(),
            Some("failed to load clients: network error: connection refused")
        );
        assert!(store.refresh().await);
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn get_leaves_list_untouched() {
        let (mut store, _) = store(vec![Ok(client_json(5, "Umbrella")), Err(ApiError::from_response(404, ""))]);

        assert_eq!(store.get(ClientId::new(5)).await.unwrap().business_name, "Umbrella");
        assert!(store.items().is_empty());
        assert!(store.get(ClientId::new(6)).await.is_none());
        assert_eq!(
            store.error(),
            Some("failed to get client: request failed with status code 404")
        );
    }

    fn task_json(id: i64, due: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Task {id}"),
            "status": "PENDING",
            "priority": "MEDIUM",
            "dueDate": due,
            "createdAt": "2024-07-01T00:00:00"
        })
    }

    fn task_store(responses: Vec<Result<serde_json::Value, ApiError>>) -> ResourceStore<Tasks> {
        ResourceStore::new(ResourceService::new(Arc::new(ScriptedTransport::new(responses))))
    }

    #[tokio::test]
    async fn loads_tasks_with_date_only_timestamps() {
        let mut store = task_store(vec![Ok(json!([
            task_json(1, "2024-08-01"),
            task_json(2, "2024-08-02T15:30:00.000Z"),
        ]))]);

        assert!(store.fetch(TaskFilters::default()).await);
        assert_eq!(store.error(), None);
        assert_eq!(store.items()[0].due_date, Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
        assert_eq!(store.items()[0].created_at, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(store.items()[1].due_date, Utc.with_ymd_and_hms(2024, 8, 2, 15, 30, 0).unwrap());
    }

    #[tokio::test]
    async fn created_task_goes_to_the_top() {
        let mut store = task_store(vec![Ok(json!([task_json(1, "2024-08-01")])), Ok(task_json(2, "2024-08-05"))]);

        store.fetch(TaskFilters::default()).await;
        store
            .create(&CreateTaskRequest {
                title: "Task 2".to_string(),
                description: None,
                status: None,
                priority: TaskPriority::Medium,
                due_date: Utc.with_ymd_and_hms(2024, 8, 5, 0, 0, 0).unwrap(),
                estimated_hours: None,
                actual_hours: None,
                client_ids: None,
                employee_ids: None,
                task_type_id: None,
                event_id: None,
            })
            .await
            .unwrap();

        let ids: Vec<_> = store.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, [TaskId::new(2), TaskId::new(1)]);
    }
}
