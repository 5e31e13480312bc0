use serde_json::json;

use rhc_core::ClientTokenId;

use super::ResourceService;
use crate::dto::{ClientToken, RenewClientTokenRequest, Validate, ValidateTokenRequest, ValidateTokenResponse};
use crate::error::ApiError;
use crate::resource::ClientTokens;
use crate::transport::{ApiRequest, decode, fetch, to_body, unwrap_data};

const VALIDATE_PATH: &str = "/clienttokens/validate";

impl ResourceService<ClientTokens> {
    /// Extend a token's validity window.
    pub async fn renew(&self, id: ClientTokenId, request: &RenewClientTokenRequest) -> Result<ClientToken, ApiError> {
        request.validate()?;
        self.put(format!("{}/renew", Self::item_path(id)), request).await
    }

    pub async fn toggle_active(&self, id: ClientTokenId, is_active: bool) -> Result<ClientToken, ApiError> {
        self.put(Self::item_path(id), &json!({ "isActive": is_active })).await
    }

    /// `GET /clienttokens/validate?token=..` as the logged-in user.
    pub async fn validate_get(&self, token: &str) -> Result<ValidateTokenResponse, ApiError> {
        fetch(self.transport(), ApiRequest::get(VALIDATE_PATH).with_query("token", token)).await
    }

    /// `POST /clienttokens/validate` as the logged-in user.
    pub async fn validate(&self, request: &ValidateTokenRequest) -> Result<ValidateTokenResponse, ApiError> {
        fetch(self.transport(), ApiRequest::post(VALIDATE_PATH, to_body(request)?)).await
    }

    /// Unauthenticated validation; accepts both enveloped and bare answers.
    pub async fn validate_public(&self, token: &str) -> Result<ValidateTokenResponse, ApiError> {
        let request = ApiRequest::get(VALIDATE_PATH).with_query("token", token).public();
        decode(unwrap_data(self.transport().send(request).await?))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::testing::ScriptedTransport;
    use crate::transport::Method;

    fn validation() -> serde_json::Value {
        json!({"token": "tok", "isValid": true, "clientId": 5, "expiresAt": "2030-01-01T00:00:00Z", "message": "valid"})
    }

    #[tokio::test]
    async fn validation_variants() {
        let transport = Arc::new(ScriptedTransport::new([
            Ok(validation()),
            Ok(validation()),
            Ok(json!({"data": validation()})),
            Ok(validation()),
        ]));
        let service = ResourceService::<ClientTokens>::new(transport.clone());

        assert!(service.validate_get("tok").await.unwrap().is_valid);
        assert!(
            service
                .validate(&ValidateTokenRequest {
                    token: "tok".to_string()
                })
                .await
                .unwrap()
                .is_valid
        );
        assert!(service.validate_public("tok").await.unwrap().is_valid);
        assert!(service.validate_public("tok").await.unwrap().is_valid);

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Get);
        assert!(!sent[0].public);
        assert_eq!(sent[1].method, Method::Post);
        assert_eq!(sent[1].body, Some(json!({"token": "tok"})));
        assert!(sent[2].public && sent[3].public);
    }

    #[tokio::test]
    async fn renew_and_toggle_paths() {
        let token = json!({
            "id": 9, "clientId": 5, "token": "tok", "expiresAt": "2030-01-01T00:00:00Z", "isActive": true,
            "createdBy": 1, "createdAt": "2024-01-01T00:00:00Z"
        });
        let transport = Arc::new(ScriptedTransport::new([Ok(token.clone()), Ok(token)]));
        let service = ResourceService::<ClientTokens>::new(transport.clone());
        let id = ClientTokenId::new(9);

        service
            .renew(id, &RenewClientTokenRequest { validity_minutes: 60 })
            .await
            .unwrap();
        service.toggle_active(id, true).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].path, "/clienttokens/9/renew");
        assert_eq!(sent[0].body, Some(json!({"validityMinutes": 60})));
        assert_eq!(sent[1].body, Some(json!({"isActive": true})));
    }
}
