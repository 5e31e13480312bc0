use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rhc_core::{ClientId, DomainResult, Entity};

use super::{Validate, require};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub business_name: String,
    pub phone: String,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contracted_services: Option<Vec<String>>,
    #[serde(default, with = "super::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> ClientId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub business_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contracted_services: Option<Vec<String>>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contracted_services: Option<Vec<String>>,
}

impl Validate for CreateClientRequest {
    fn validate(&self) -> DomainResult<()> {
        require("business name", &self.business_name)?;
        require("phone", &self.phone)
    }
}

impl Validate for UpdateClientRequest {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nullable_fields() {
        let client: Client = serde_json::from_str(
            r#"{"id":3,"businessName":"Acme SAS","phone":"555","nit":null,"contractedServices":["payroll"],
                "createdAt":"2024-05-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(client.id(), ClientId::new(3));
        assert_eq!(client.nit, None);
        assert_eq!(client.contracted_services, Some(vec!["payroll".to_string()]));
        assert!(client.created_at.is_some());
    }

    #[test]
    fn update_omits_unset_fields() {
        let update = UpdateClientRequest {
            phone: Some("777".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"phone":"777"}"#);
    }
}
