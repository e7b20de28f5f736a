//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Configured backends and signup queue depth

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::state::AppState;

/// Body of a `/healthz` response.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub storage: &'static str,
    pub queue: &'static str,
    pub queue_name: String,
    /// `None` when the queue backend could not be reached.
    pub queue_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Backend names and approximate queue length.
///
/// Returns 503 when the queue backend cannot report a length.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    let queue_name = state.queue_access.queue_name().to_string();

    let (status, queue_length, error) = match state.queue.approximate_length(&queue_name).await {
        Ok(len) => (StatusCode::OK, Some(len), None),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, None, Some(err.to_string())),
    };

    let report = HealthReport {
        storage: state.storage_backend,
        queue: state.queue_backend,
        queue_name,
        queue_length,
        error,
    };

    (status, Json(report)).into_response()
}
