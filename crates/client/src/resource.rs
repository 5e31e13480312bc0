//! Static description of each backend collection.

use serde::Serialize;
use serde::de::DeserializeOwned;

use rhc_core::Entity;

use crate::dto::{
    Client, ClientToken, ClientTokenFilter, CreateClientRequest, CreateClientTokenRequest, CreateEmployeeRequest,
    CreateEventRequest, CreateTaskRequest, CreateTaskTypeRequest, Employee, Event, EventFilter, ListFilter, NoFilter,
    PublicEvent, Task, TaskFilters, TaskType, UpdateClientRequest, UpdateClientTokenRequest, UpdateEmployeeRequest,
    UpdateEventRequest, UpdateTaskRequest, UpdateTaskTypeRequest, Validate, ValidateTokenResponse,
};

/// How a list store reconciles its cache after a confirmed mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AfterMutation {
    /// Reload the whole list from the backend.
    Refetch,
    /// Apply the backend's answer to the cached list.
    Patch,
}

/// A REST collection: `GET/POST <PATH>`, `GET/PUT/DELETE <PATH>/{id}`.
pub trait Resource: Send + Sync + 'static {
    type Entity: Entity + DeserializeOwned + Clone + Send + Sync;
    type Create: Serialize + Validate + Send + Sync;
    type Update: Serialize + Validate + Send + Sync;
    type Filter: ListFilter;
    /// Resource-specific state kept by the list store.
    type Extra: Default + Send + Sync;

    const PATH: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    const AFTER_MUTATION: AfterMutation;
    /// Patched stores insert created entities at the front instead of the end.
    const PREPEND_CREATED: bool = false;
}

/// Identifier type of a resource's entity.
pub type IdOf<R> = <<R as Resource>::Entity as Entity>::Id;

#[derive(Debug, Copy, Clone, Default)]
pub struct Clients;

impl Resource for Clients {
    type Entity = Client;
    type Create = CreateClientRequest;
    type Update = UpdateClientRequest;
    type Filter = NoFilter;
    type Extra = ();

    const PATH: &'static str = "/clients";
    const SINGULAR: &'static str = "client";
    const PLURAL: &'static str = "clients";
    const AFTER_MUTATION: AfterMutation = AfterMutation::Patch;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Employees;

impl Resource for Employees {
    type Entity = Employee;
    type Create = CreateEmployeeRequest;
    type Update = UpdateEmployeeRequest;
    type Filter = NoFilter;
    type Extra = ();

    const PATH: &'static str = "/employees";
    const SINGULAR: &'static str = "employee";
    const PLURAL: &'static str = "employees";
    const AFTER_MUTATION: AfterMutation = AfterMutation::Patch;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Events;

impl Resource for Events {
    type Entity = Event;
    type Create = CreateEventRequest;
    type Update = UpdateEventRequest;
    type Filter = EventFilter;
    /// Last result of the public event listing.
    type Extra = Vec<PublicEvent>;

    const PATH: &'static str = "/events";
    const SINGULAR: &'static str = "event";
    const PLURAL: &'static str = "events";
    const AFTER_MUTATION: AfterMutation = AfterMutation::Refetch;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Tasks;

impl Resource for Tasks {
    type Entity = Task;
    type Create = CreateTaskRequest;
    type Update = UpdateTaskRequest;
    type Filter = TaskFilters;
    type Extra = ();

    const PATH: &'static str = "/tasks";
    const SINGULAR: &'static str = "task";
    const PLURAL: &'static str = "tasks";
    const AFTER_MUTATION: AfterMutation = AfterMutation::Patch;
    const PREPEND_CREATED: bool = true;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct TaskTypes;

impl Resource for TaskTypes {
    type Entity = TaskType;
    type Create = CreateTaskTypeRequest;
    type Update = UpdateTaskTypeRequest;
    type Filter = NoFilter;
    type Extra = ();

    const PATH: &'static str = "/tasktypes";
    const SINGULAR: &'static str = "task type";
    const PLURAL: &'static str = "task types";
    const AFTER_MUTATION: AfterMutation = AfterMutation::Patch;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct ClientTokens;

impl Resource for ClientTokens {
    type Entity = ClientToken;
    type Create = CreateClientTokenRequest;
    type Update = UpdateClientTokenRequest;
    type Filter = ClientTokenFilter;
    /// Outcome of the last token validation.
    type Extra = Option<ValidateTokenResponse>;

    const PATH: &'static str = "/clienttokens";
    const SINGULAR: &'static str = "token";
    const PLURAL: &'static str = "tokens";
    const AFTER_MUTATION: AfterMutation = AfterMutation::Refetch;
}
