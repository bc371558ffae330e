//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Template cache status (passive, never touches storage)

use axum::{extract::State, http::StatusCode, Json};

use sagefemme_core::cache::CacheStatus;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Template cache status.
///
/// Always 200: an empty or stale cache is degraded, not down.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<CacheStatus> {
    Json(state.templates.status().await)
}
