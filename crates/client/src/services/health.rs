use std::sync::Arc;

use crate::dto::{HealthCheckResponse, PingResponse};
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport, fetch};

#[derive(Clone)]
pub struct HealthService {
    transport: Arc<dyn Transport>,
}

impl core::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HealthService").finish_non_exhaustive()
    }
}

impl HealthService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn check(&self) -> Result<HealthCheckResponse, ApiError> {
        fetch(self.transport.as_ref(), ApiRequest::get("/health")).await
    }

    /// `true` only when the backend answers `{"status": "ok"}`; any failure is
    /// `false`.
    pub async fn ping(&self) -> bool {
        match fetch::<PingResponse>(self.transport.as_ref(), ApiRequest::get("/health/ping")).await {
            Ok(resp) => resp.is_ok(),
            Err(err) => {
                tracing::debug!(error = %err, "health ping failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::ScriptedTransport;

    #[tokio::test]
    async fn ping_is_false_on_any_failure() {
        let transport = Arc::new(ScriptedTransport::new([
            Ok(json!({"status": "ok"})),
            Ok(json!({"status": "degraded"})),
            Err(ApiError::Network("refused".to_string())),
            Ok(json!("garbage")),
        ]));
        let health = HealthService::new(transport);
        assert!(health.ping().await);
        assert!(!health.ping().await);
        assert!(!health.ping().await);
        assert!(!health.ping().await);
    }

    #[tokio::test]
    async fn decodes_health_report() {
        let transport = Arc::new(ScriptedTransport::new([Ok(json!({
            "status": "healthy", "timestamp": "2024-06-01T00:00:00Z", "uptime": 1234.5,
            "database": {"status": "connected", "responseTime": 12},
            "memory": {"used": 100, "total": 400, "percentage": 25.0},
            "version": "1.4.0"
        }))]));
        let report = HealthService::new(transport).check().await.unwrap();
        assert_eq!(report.database.status, "connected");
        assert_eq!(report.memory.percentage, 25.0);
    }
}
