//! Server configuration, read from the environment.

use std::path::PathBuf;

use postforge_embeddings::{DEFAULT_DIMENSION, DEFAULT_MODEL};

use crate::error::{ServerError, ServerResult};

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Path to the catalog artifact written by `build-catalog`.
    pub catalog_path: PathBuf,

    /// Embedding API base URL, without the trailing `/embeddings`.
    pub embeddings_base_url: String,

    /// Bearer token for the embedding API, if the deployment requires one.
    pub embeddings_api_key: Option<String>,

    /// Embedding model to request.
    pub embeddings_model: String,

    /// Expected embedding dimension.
    pub embeddings_dimension: usize,

    /// Encoder cache capacity; 0 disables caching.
    pub cache_entries: usize,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> ServerResult<Self> {
        Ok(Self {
            host: env_or("POSTFORGE_HOST", "0.0.0.0"),
            port: parse_env("POSTFORGE_PORT", 8000)?,
            catalog_path: PathBuf::from(env_or(
                "POSTFORGE_CATALOG_PATH",
                "models/catalog.json",
            )),
            embeddings_base_url: env_or("EMBEDDINGS_BASE_URL", "http://127.0.0.1:8081/v1"),
            embeddings_api_key: std::env::var("EMBEDDINGS_API_KEY").ok(),
            embeddings_model: env_or("EMBEDDINGS_MODEL", DEFAULT_MODEL),
            embeddings_dimension: parse_env("EMBEDDINGS_DIMENSION", DEFAULT_DIMENSION)?,
            cache_entries: parse_env("POSTFORGE_CACHE_ENTRIES", 1024)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> ServerResult<T> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ServerError::Config(format!("invalid value for {key}: {value:?}"))),
        Err(_) => Ok(default),
    }
}
