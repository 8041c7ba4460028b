//! Shared application state.

use std::sync::Arc;

use postforge_templates::TemplateRanker;

/// State passed to all route handlers.
///
/// The ranker is immutable after startup; handlers only read it.
pub struct AppState {
    pub ranker: Arc<TemplateRanker>,
}
