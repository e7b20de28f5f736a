//! Health check operations.

use serde::{Deserialize, Serialize};

use super::BookclubClient;
use crate::error::{ClientError, Result};

/// Server health report from `/healthz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub storage: String,
    pub queue: String,
    pub queue_name: String,
    pub queue_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookclubClient {
    /// Check that the server is accepting connections.
    pub async fn livez(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        self.handle_empty_response(response).await
    }

    /// Get configured backends and the signup queue depth.
    ///
    /// An unhealthy server answers 503 with the same report, its `error`
    /// set; that is returned as `Ok` too.
    pub async fn healthz(&self) -> Result<HealthReport> {
        let response = self.client.get(self.url("/healthz")).send().await?;
        if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return response.json().await.map_err(ClientError::from);
        }
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_healthz_parses_report() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/healthz");
                then.status(200).json_body(serde_json::json!({
                    "storage": "sqlite",
                    "queue": "redis",
                    "queue_name": "bookclubsignups",
                    "queue_length": 3
                }));
            })
            .await;

        let report = BookclubClient::new(server.base_url())
            .healthz()
            .await
            .unwrap();

        assert_eq!(report.storage, "sqlite");
        assert_eq!(report.queue_length, Some(3));
        assert_eq!(report.error, None);
    }

    #[tokio::test]
    async fn test_healthz_unavailable_returns_report_with_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/healthz");
                then.status(503).json_body(serde_json::json!({
                    "storage": "inmemory",
                    "queue": "redis",
                    "queue_name": "bookclubsignups",
                    "queue_length": null,
                    "error": "Queue connection failed: refused"
                }));
            })
            .await;

        let report = BookclubClient::new(server.base_url())
            .healthz()
            .await
            .unwrap();

        assert_eq!(report.queue_length, None);
        assert_eq!(
            report.error.as_deref(),
            Some("Queue connection failed: refused")
        );
    }

    #[tokio::test]
    async fn test_healthz_other_failure_is_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/healthz");
                then.status(500).body("boom");
            })
            .await;

        let err = BookclubClient::new(server.base_url())
            .healthz()
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::ServerError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_livez_not_found_is_reported() {
        let server = MockServer::start_async().await;

        let err = BookclubClient::new(server.base_url())
            .livez()
            .await
            .unwrap_err();

        assert!(matches!(err, crate::ClientError::NotFound { .. }));
    }
}
