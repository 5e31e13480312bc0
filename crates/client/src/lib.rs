//! `rhc-client`: REST data layer of the RHC business-management client.
//!
//! **Responsibility:** thin per-resource services over a [`Transport`], list
//! stores that cache what the backend returned, and the DTOs both exchange.
//!
//! The backend is the authority: stores never invent records, they only
//! mirror confirmed responses.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod resource;
pub mod services;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;

pub use auth::ApiAuthService;
pub use config::ClientConfig;
pub use dto::{ListFilter, NoFilter};
pub use error::ApiError;
pub use resource::{AfterMutation, ClientTokens, Clients, Employees, Events, Resource, TaskTypes, Tasks};
pub use services::{ApiClient, HealthService, ResourceService};
pub use store::ResourceStore;
pub use transport::{ApiRequest, HttpTransport, Method, Transport};

/// Store of cached clients.
pub type ClientStore = ResourceStore<Clients>;
pub type EmployeeStore = ResourceStore<Employees>;
pub type EventStore = ResourceStore<Events>;
pub type TaskStore = ResourceStore<Tasks>;
pub type TaskTypeStore = ResourceStore<TaskTypes>;
pub type ClientTokenStore = ResourceStore<ClientTokens>;
