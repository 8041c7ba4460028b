//! # Embeddings
//!
//! Embedding primitives for the Postforge template matcher:
//!
//! - **Encoding**: turn text into dense vectors via a remote embedding API
//! - **Similarity**: cosine similarity between vectors
//! - **Caching**: avoid re-encoding text the service has already seen

pub mod cache;
pub mod encoder;
pub mod error;
pub mod similarity;

pub use cache::CachedEncoder;
pub use encoder::{Encoder, HttpEncoder};
pub use error::{EmbeddingError, Result};
pub use similarity::cosine_similarity;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Default encoder model. The catalog artifacts shipped with the service are
/// encoded with this model; query embeddings must come from the same one.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Embedding dimension of [`DEFAULT_MODEL`].
pub const DEFAULT_DIMENSION: usize = 384;
