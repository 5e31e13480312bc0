//! Per-resource API services.
//!
//! Each service is a thin, stateless mapping from calls to requests; caching
//! and error presentation live in [`crate::store`].

mod client_tokens;
mod employees;
mod events;
mod health;
mod task_types;
mod tasks;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dto::{ListFilter, Validate};
use crate::error::ApiError;
use crate::resource::{ClientTokens, Clients, Employees, Events, IdOf, Resource, TaskTypes, Tasks};
use crate::transport::{ApiRequest, Transport, decode, fetch, to_body};

pub use health::HealthService;

/// CRUD calls for one [`Resource`].
pub struct ResourceService<R> {
    transport: Arc<dyn Transport>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> core::fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceService")
            .field("resource", &core::any::type_name::<R>())
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    fn item_path(id: IdOf<R>) -> String {
        format!("{}/{id}", R::PATH)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub async fn list(&self, filter: &R::Filter) -> Result<Vec<R::Entity>, ApiError> {
        let request = ApiRequest::get(R::PATH).with_params(filter.query());
        let value = self.transport.send(request).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        decode(value)
    }

    pub async fn get(&self, id: IdOf<R>) -> Result<R::Entity, ApiError> {
        fetch(self.transport(), ApiRequest::get(Self::item_path(id))).await
    }

    pub async fn create(&self, body: &R::Create) -> Result<R::Entity, ApiError> {
        body.validate()?;
        fetch(self.transport(), ApiRequest::post(R::PATH, to_body(body)?)).await
    }

    pub async fn update(&self, id: IdOf<R>, body: &R::Update) -> Result<R::Entity, ApiError> {
        body.validate()?;
        self.put(Self::item_path(id), body).await
    }

    pub async fn delete(&self, id: IdOf<R>) -> Result<(), ApiError> {
        self.transport.send(ApiRequest::delete(Self::item_path(id))).await?;
        Ok(())
    }

    pub(crate) async fn put<B: Serialize, D: DeserializeOwned>(&self, path: String, body: &B) -> Result<D, ApiError> {
        fetch(self.transport(), ApiRequest::put(path, to_body(body)?)).await
    }
}

/// Every service over one shared transport.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub clients: ResourceService<Clients>,
    pub employees: ResourceService<Employees>,
    pub events: ResourceService<Events>,
    pub tasks: ResourceService<Tasks>,
    pub task_types: ResourceService<TaskTypes>,
    pub client_tokens: ResourceService<ClientTokens>,
    pub health: HealthService,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            clients: ResourceService::new(transport.clone()),
            employees: ResourceService::new(transport.clone()),
            events: ResourceService::new(transport.clone()),
            tasks: ResourceService::new(transport.clone()),
            task_types: ResourceService::new(transport.clone()),
            client_tokens: ResourceService::new(transport.clone()),
            health: HealthService::new(transport),
        }
    }
}
