//! Error types for the templates crate.

use postforge_embeddings::EmbeddingError;
use thiserror::Error;

/// Result type alias for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors that can occur while loading the catalog or ranking against it.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The query could not be encoded, so no ranking was produced.
    #[error("ranking unavailable: {0}")]
    RankingUnavailable(#[source] EmbeddingError),

    /// The catalog artifact contains no entries.
    #[error("catalog artifact is empty")]
    EmptyCatalog,

    /// Two catalog entries share an identifier.
    #[error("duplicate template id in catalog: {0}")]
    DuplicateId(String),

    /// A catalog entry's embedding has the wrong dimension.
    #[error("catalog entry {id} has dimension {actual}, expected {expected}")]
    EntryDimension {
        id: String,
        expected: usize,
        actual: usize,
    },

    /// The catalog artifact is not valid JSON.
    #[error("malformed catalog artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
