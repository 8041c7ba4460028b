//! Template suggestion endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use postforge_templates::Suggestion;
use serde::Deserialize;

use crate::error::ServerResult;
use crate::state::AppState;

/// Request body for `POST /suggest-templates`.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// The user's prompt to match templates against.
    pub query_text: String,

    /// Maximum number of suggestions to return.
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

fn default_top_k() -> i64 {
    3
}

/// POST /suggest-templates - rank catalog templates against a prompt.
pub async fn suggest_templates(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestRequest>,
) -> ServerResult<Json<Vec<Suggestion>>> {
    // JSON integers can be negative; anything non-positive ranks nothing.
    let top_k = usize::try_from(request.top_k).unwrap_or(0);

    let suggestions = state.ranker.suggest(&request.query_text, top_k).await?;
    Ok(Json(suggestions))
}
