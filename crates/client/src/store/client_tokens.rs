use rhc_core::ClientTokenId;

use super::{Operation, ResourceStore};
use crate::dto::{RenewClientTokenRequest, ValidateTokenRequest, ValidateTokenResponse};
use crate::resource::ClientTokens;

impl ResourceStore<ClientTokens> {
    /// Outcome of the last [`ResourceStore::validate`]; cleared when a new
    /// validation starts.
    pub fn validation_result(&self) -> Option<&ValidateTokenResponse> {
        self.extra.as_ref()
    }

    pub async fn renew(&mut self, id: ClientTokenId, validity_minutes: u32) -> bool {
        self.begin();
        let result = self
            .service()
            .renew(id, &RenewClientTokenRequest { validity_minutes })
            .await;
        let Some(renewed) = self.settle(Operation::Renew, result) else {
            return false;
        };
        self.apply_updated(&renewed).await;
        true
    }

    pub async fn toggle_active(&mut self, id: ClientTokenId, is_active: bool) -> bool {
        self.begin();
        let result = self.service().toggle_active(id, is_active).await;
        let Some(updated) = self.settle(Operation::ToggleActive, result) else {
            return false;
        };
        self.apply_updated(&updated).await;
        true
    }

    pub async fn validate(&mut self, token: impl Into<String>) -> Option<ValidateTokenResponse> {
        self.begin();
        self.extra = None;
        let request = ValidateTokenRequest { token: token.into() };
        let result = self.service().validate(&request).await;
        let response = self.settle(Operation::Validate, result)?;
        self.extra = Some(response.clone());
        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::dto::ClientTokenFilter;
    use crate::error::ApiError;
    use crate::services::ResourceService;
    use crate::testing::ScriptedTransport;

    fn token(id: i64, active: bool) -> serde_json::Value {
        json!({
            "id": id, "clientId": 5, "token": format!("tok-{id}"), "expiresAt": "2030-01-01T00:00:00Z",
            "isActive": active, "createdBy": 1, "createdAt": "2024-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn toggle_refetches_list() {
        let transport = Arc::new(ScriptedTransport::new([
            Ok(json!([token(1, true)])),
            Ok(token(1, false)),
            Ok(json!([token(1, false)])),
        ]));
        let mut store = ResourceStore::<ClientTokens>::new(ResourceService::new(transport.clone()));

        store.fetch(ClientTokenFilter::default()).await;
        assert!(store.toggle_active(ClientTokenId::new(1), false).await);
        assert!(!store.items()[0].is_active);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn validation_result_is_reset_per_attempt() {
        let transport = Arc::new(ScriptedTransport::new([
            Ok(json!({"token": "tok-1", "isValid": true, "clientId": 5, "expiresAt": "2030-01-01T00:00:00Z", "message": "ok"})),
            Err(ApiError::from_response(404, r#"{"message":"Token not found"}"#)),
        ]));
        let mut store = ResourceStore::<ClientTokens>::new(ResourceService::new(transport));

        assert!(store.validate("tok-1").await.unwrap().is_valid);
        assert!(store.validation_result().is_some());

        assert!(store.validate("nope").await.is_none());
        assert!(store.validation_result().is_none());
        assert_eq!(store.error(), Some("failed to validate token: Token not found"));
    }

    #[tokio::test]
    async fn failed_renew_reports_error() {
        let transport = Arc::new(ScriptedTransport::new([Err(ApiError::Network("timeout".to_string()))]));
        let mut store = ResourceStore::<ClientTokens>::new(ResourceService::new(transport));

        assert!(!store.renew(ClientTokenId::new(1), 30).await);
        assert_eq!(store.error(), Some("failed to renew token: network error: timeout"));
    }
}
