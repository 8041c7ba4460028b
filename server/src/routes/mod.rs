//! HTTP routes.

pub mod health;
pub mod suggest;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Assemble the service router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/suggest-templates", post(suggest::suggest_templates))
        .with_state(state)
}
