//! Health check.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

use crate::state::AppState;

/// GET /health - liveness plus catalog status.
///
/// Returns 200 whenever the process is up, even with the catalog missing:
/// a degraded ranker must not fail the whole service's health checks.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = if state.ranker.catalog().is_loaded() {
        "loaded"
    } else {
        "unavailable"
    };

    Json(json!({
        "status": "ok",
        "service": "postforge-server",
        "catalog": catalog,
    }))
}
