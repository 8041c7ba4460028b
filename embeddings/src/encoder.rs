//! Text encoders.
//!
//! The service talks to an embedding model served over HTTP (OpenAI-compatible
//! `/embeddings` wire format, as exposed by text-embeddings-inference and
//! similar servers).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EmbeddingError, Result};
use crate::{DEFAULT_DIMENSION, DEFAULT_MODEL, Embedding};

/// Trait for text encoders.
///
/// Encoders must be deterministic for a fixed model version: identical input
/// text yields an identical embedding, so ranking against a fixed catalog is
/// reproducible across calls.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Model identifier this encoder runs.
    fn model(&self) -> &str;

    /// Dimension of the embeddings this encoder produces.
    fn dimension(&self) -> usize;

    /// Encode a single text.
    async fn encode(&self, text: &str) -> Result<Embedding>;

    /// Encode multiple texts, preserving input order.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        // Default implementation: one request per text.
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.encode(text).await?);
        }
        Ok(results)
    }
}

/// Encoder backed by a remote embedding API.
pub struct HttpEncoder {
    /// API base URL, without the trailing `/embeddings`.
    base_url: String,

    /// Bearer token, if the deployment requires one.
    api_key: Option<String>,

    /// Model to request.
    model: String,

    /// Expected embedding dimension; responses are validated against it.
    dimension: usize,

    /// HTTP client.
    client: reqwest::Client,
}

impl HttpEncoder {
    /// Create a new encoder for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            dimension: DEFAULT_DIMENSION,
            client: reqwest::Client::new(),
        }
    }

    /// Set the bearer token.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model to request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected embedding dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    async fn request(&self, input: serde_json::Value) -> Result<Vec<Embedding>> {
        let body = serde_json::json!({
            "input": input,
            "model": self.model,
        });

        let mut request = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(EmbeddingError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api(format!("{status}: {body}")));
        }

        let parsed: EmbeddingsResponse = response.json().await?;

        let embeddings: Vec<Embedding> =
            parsed.data.into_iter().map(|d| d.embedding).collect();

        for embedding in &embeddings {
            if embedding.len() != self.dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: self.dimension,
                    actual: embedding.len(),
                });
            }
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl Encoder for HttpEncoder {
    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn encode(&self, text: &str) -> Result<Embedding> {
        debug!(model = %self.model, "encoding text");

        let embeddings = self.request(serde_json::json!(text)).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding in response".to_string()))
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model = %self.model, count = texts.len(), "encoding batch");

        let embeddings = self.request(serde_json::json!(texts)).await?;
        if embeddings.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }
}

/// Embedding API response format.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn encode_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(body_partial_json(serde_json::json!({"input": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [0.25, 0.5, 0.75]}]
            })))
            .mount(&server)
            .await;

        let encoder = HttpEncoder::new(server.uri()).with_dimension(3);
        let embedding = encoder.encode("hello").await.unwrap();
        assert_eq!(embedding, vec![0.25, 0.5, 0.75]);
    }

    #[tokio::test]
    async fn encode_batch_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"embedding": [1.0, 0.0]},
                    {"embedding": [0.0, 1.0]}
                ]
            })))
            .mount(&server)
            .await;

        let encoder = HttpEncoder::new(server.uri()).with_dimension(2);
        let texts = vec!["first".to_string(), "second".to_string()];
        let embeddings = encoder.encode_batch(&texts).await.unwrap();
        assert_eq!(embeddings, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn wrong_dimension_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [0.25, 0.5]}]
            })))
            .mount(&server)
            .await;

        let encoder = HttpEncoder::new(server.uri()).with_dimension(3);
        let err = encoder.encode("hello").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let encoder = HttpEncoder::new(server.uri());
        let err = encoder.encode("hello").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::RateLimited {
                retry_after_secs: 7
            }
        ));
    }

    #[tokio::test]
    async fn server_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
            .mount(&server)
            .await;

        let encoder = HttpEncoder::new(server.uri());
        let err = encoder.encode("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Api(_)));
    }

    #[tokio::test]
    async fn empty_batch_skips_the_request() {
        // No mock mounted: a request would 404.
        let server = MockServer::start().await;
        let encoder = HttpEncoder::new(server.uri());
        let embeddings = encoder.encode_batch(&[]).await.unwrap();
        assert!(embeddings.is_empty());
    }
}
