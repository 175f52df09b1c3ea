//! Health probe: record-store availability for the issuing UI.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Router for `/health`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Response body for the health probe.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the record store answered the probe.
    pub online: bool,
    /// Name of the configured backend.
    pub backend: String,
}

/// `GET /health` — probe the record store. Always 200; the body says
/// whether the store is reachable.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = state.service.health().await;
    Json(HealthResponse {
        online: report.online,
        backend: report.backend.to_string(),
    })
}
