//! `rhc-core`: shared building blocks for the RHC client crates.
//!
//! Identifiers, the entity contract used by list stores, and the domain error
//! model. No transport or UI concerns live here.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ClientId, ClientTokenId, EmployeeId, EventId, TaskId, TaskTypeId, UserId};
