//! Error types for the embeddings crate.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while encoding text.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// API request failed.
    #[error("embedding API request failed: {0}")]
    Api(String),

    /// Invalid response from the embedding API.
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
