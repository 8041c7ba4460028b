//! Template similarity ranking.

use std::cmp::Reverse;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use postforge_embeddings::{Encoder, cosine_similarity};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::CatalogState;
use crate::error::{Result, TemplateError};

/// A ranked template suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Identifier of the suggested template.
    pub template_id: String,

    /// Cosine similarity between the prompt and the template, in [-1, 1].
    pub similarity_score: f32,
}

/// Ranks the template catalog against user prompts.
///
/// Built once at startup from a catalog handle and an encoder reference, then
/// shared immutably. `suggest` never mutates anything, so any number of
/// concurrent calls may run without synchronization.
pub struct TemplateRanker {
    catalog: CatalogState,
    encoder: Arc<dyn Encoder>,
}

impl TemplateRanker {
    /// Create a ranker over the given catalog and encoder.
    pub fn new(catalog: CatalogState, encoder: Arc<dyn Encoder>) -> Self {
        Self { catalog, encoder }
    }

    /// The catalog this ranker serves.
    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    /// Suggest the `top_k` catalog templates closest to `query_text`,
    /// ordered by descending cosine similarity. Equal scores keep catalog
    /// order, so repeated calls with the same input return the same list.
    ///
    /// An empty or whitespace-only prompt carries no signal to rank against
    /// and yields no suggestions; so does a missing catalog, which keeps the
    /// rest of the service usable when model artifacts are absent. `top_k`
    /// larger than the catalog is clamped to the catalog size.
    ///
    /// Encoding the query is the only await point; dropping the returned
    /// future cancels a pending encoder call.
    pub async fn suggest(&self, query_text: &str, top_k: usize) -> Result<Vec<Suggestion>> {
        if query_text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let Some(catalog) = self.catalog.catalog() else {
            debug!("catalog unavailable, returning no suggestions");
            return Ok(Vec::new());
        };

        if top_k == 0 {
            return Ok(Vec::new());
        }

        let query = self
            .encoder
            .encode(query_text)
            .await
            .map_err(TemplateError::RankingUnavailable)?;

        let mut scored: Vec<(OrderedFloat<f32>, usize)> = Vec::with_capacity(catalog.len());
        for (position, entry) in catalog.entries().iter().enumerate() {
            match cosine_similarity(&query, &entry.embedding) {
                Ok(score) => scored.push((OrderedFloat(score), position)),
                Err(err) => {
                    // One corrupt entry must not deny the whole ranking.
                    warn!(template_id = %entry.id, %err, "skipping catalog entry");
                }
            }
        }

        scored.sort_by_key(|&(score, position)| (Reverse(score), position));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(score, position)| Suggestion {
                template_id: catalog.entries()[position].id.clone(),
                similarity_score: score.0,
            })
            .collect())
    }
}
