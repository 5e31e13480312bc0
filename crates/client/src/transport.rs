//! Request plumbing between services and the backend.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use rhc_auth::CredentialStore;

use crate::config::ClientConfig;
use crate::error::ApiError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One backend call, independent of the HTTP client that performs it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `/clients/4`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Public endpoints go to the public base URL without a bearer token.
    pub public: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            public: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }
}

/// Sends requests to the backend and returns the decoded JSON body.
///
/// An empty success body comes back as `Value::Null`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// Send a request and decode the body into `D`.
pub(crate) async fn fetch<D: DeserializeOwned>(transport: &dyn Transport, request: ApiRequest) -> Result<D, ApiError> {
    let value = transport.send(request).await?;
    decode(value)
}

pub(crate) fn decode<D: DeserializeOwned>(value: Value) -> Result<D, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Public endpoints wrap their payload as `{ "data": ... }`.
pub(crate) fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

pub(crate) fn to_body<S: serde::Serialize>(body: &S) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// [`Transport`] over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
    public_api_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl core::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_url", &self.api_url)
            .field("public_api_url", &self.public_api_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            public_api_url: config.public_api_url().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn url(&self, request: &ApiRequest) -> String {
        let base = if request.public {
            &self.public_api_url
        } else {
            &self.api_url
        };
        format!("{base}{}", request.path)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request);
        let mut req = self.client.request(request.method.into(), &url);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if !request.public {
            if let Some(token) = self.credentials.token() {
                req = req.bearer_auth(token);
            }
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        tracing::debug!(method = ?request.method, url = %url, "api request");
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &text);
            tracing::warn!(status = status.as_u16(), url = %url, error = %err, "api request failed");
            return Err(err);
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use rhc_auth::MemoryCredentialStore;

    use super::*;

    #[test]
    fn builds_requests() {
        let req = ApiRequest::get("/tasks").with_query("status", "PENDING").public();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.query, vec![("status".to_string(), "PENDING".to_string())]);
        assert!(req.public);
        assert!(req.body.is_none());

        let put = ApiRequest::put("/employees/3", json!({"active": false}));
        assert_eq!(put.body, Some(json!({"active": false})));
    }

    #[test]
    fn unwraps_data_envelope() {
        assert_eq!(unwrap_data(json!({"data": [1, 2]})), json!([1, 2]));
        assert_eq!(unwrap_data(json!({"id": 1})), json!({"id": 1}));
        assert_eq!(unwrap_data(json!({"data": null})), Value::Null);
    }

    #[test]
    fn public_requests_use_public_base() {
        let config = ClientConfig {
            api_url: "http://api.local/api/v1/".to_string(),
            public_api_url: Some("https://public.example/api/v1".to_string()),
            ..ClientConfig::default()
        };
        let transport = HttpTransport::new(&config, Arc::new(MemoryCredentialStore::new()));
        assert_eq!(transport.url(&ApiRequest::get("/clients")), "http://api.local/api/v1/clients");
        assert_eq!(
            transport.url(&ApiRequest::get("/public/events").public()),
            "https://public.example/api/v1/public/events"
        );
    }
}
