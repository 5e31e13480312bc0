use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rhc_core::{ClientId, ClientTokenId, DomainError, DomainResult, Entity, UserId};

use super::{ClientRef, ListFilter, UserRef, Validate};

/// Time-limited access token handed to a client for the public calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientToken {
    pub id: ClientTokenId,
    pub client_id: ClientId,
    pub token: String,
    #[serde(with = "super::timestamp")]
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_by: UserId,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "super::timestamp::option")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default, with = "super::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default)]
    pub creator: Option<UserRef>,
}

impl Entity for ClientToken {
    type Id = ClientTokenId;

    fn id(&self) -> ClientTokenId {
        self.id
    }
}

impl ClientToken {
    /// Active and not yet expired at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && now < self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientTokenRequest {
    pub client_id: ClientId,
    pub validity_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewClientTokenRequest {
    pub validity_minutes: u32,
}

fn check_validity(minutes: u32) -> DomainResult<()> {
    if minutes == 0 {
        return Err(DomainError::validation("validity must be at least one minute"));
    }
    Ok(())
}

impl Validate for CreateClientTokenRequest {
    fn validate(&self) -> DomainResult<()> {
        check_validity(self.validity_minutes)
    }
}

impl Validate for RenewClientTokenRequest {
    fn validate(&self) -> DomainResult<()> {
        check_validity(self.validity_minutes)
    }
}

impl Validate for UpdateClientTokenRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientTokenRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub token: String,
    pub is_valid: bool,
    pub client_id: ClientId,
    #[serde(with = "super::timestamp")]
    pub expires_at: DateTime<Utc>,
    #[serde(default, with = "super::timestamp::option")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientTokenFilter {
    pub client_id: Option<ClientId>,
}

impl ListFilter for ClientTokenFilter {
    fn query(&self) -> Vec<(String, String)> {
        self.client_id
            .map(|id| vec![("clientId".to_string(), id.to_string())])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn token(active: bool, expires_at: DateTime<Utc>) -> ClientToken {
        ClientToken {
            id: ClientTokenId::new(1),
            client_id: ClientId::new(2),
            token: "abc".to_string(),
            expires_at,
            is_active: active,
            created_by: UserId::new(3),
            created_at: expires_at - Duration::hours(1),
            last_used: None,
            updated_at: None,
            client: None,
            creator: None,
        }
    }

    #[test]
    fn usable_only_while_active_and_unexpired() {
        let now = Utc::now();
        assert!(token(true, now + Duration::minutes(5)).is_usable_at(now));
        assert!(!token(false, now + Duration::minutes(5)).is_usable_at(now));
        assert!(!token(true, now).is_usable_at(now));
    }

    #[test]
    fn zero_validity_is_rejected() {
        let create = CreateClientTokenRequest {
            client_id: ClientId::new(1),
            validity_minutes: 0,
        };
        assert_eq!(
            create.validate(),
            Err(DomainError::validation("validity must be at least one minute"))
        );
        assert!(RenewClientTokenRequest { validity_minutes: 15 }.validate().is_ok());
    }

    #[test]
    fn filter_query() {
        assert!(ClientTokenFilter::default().query().is_empty());
        let filter = ClientTokenFilter {
            client_id: Some(ClientId::new(8)),
        };
        assert_eq!(filter.query(), vec![("clientId".to_string(), "8".to_string())]);
    }
}
