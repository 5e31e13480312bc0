use rhc_core::{ClientId, EventId};

use super::ResourceService;
use crate::dto::{PublicEvent, ValidateTokenWithEventsResponse};
use crate::error::ApiError;
use crate::resource::Events;
use crate::transport::{ApiRequest, decode, unwrap_data};

impl ResourceService<Events> {
    /// Public calendar, optionally limited to one client. No authentication.
    pub async fn public_events(&self, client_id: Option<ClientId>) -> Result<Vec<PublicEvent>, ApiError> {
        let mut request = ApiRequest::get("/public/events").public();
        if let Some(id) = client_id {
            request = request.with_query("clientId", id);
        }
        let data = unwrap_data(self.transport().send(request).await?);
        if data.is_null() {
            return Ok(Vec::new());
        }
        decode(data)
    }

    pub async fn public_event(&self, id: EventId) -> Result<PublicEvent, ApiError> {
        let request = ApiRequest::get(format!("/public/events/{id}")).public();
        decode(unwrap_data(self.transport().send(request).await?))
    }

    /// Validate a client access token and fetch that client's events.
    pub async fn validate_token_and_get_events(&self, token: &str) -> Result<ValidateTokenWithEventsResponse, ApiError> {
        let request = ApiRequest::get("/public/validate-token")
            .with_query("token", token)
            .public();
        decode(unwrap_data(self.transport().send(request).await?))
    }
}
