//! Router-level tests with a stub encoder.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use postforge_embeddings::{Embedding, EmbeddingError, Encoder};
use postforge_server::{AppState, build_router};
use postforge_templates::{
    CatalogEntry, CatalogState, Suggestion, TemplateCatalog, TemplateRanker,
};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

/// Deterministic encoder backed by a fixed text → vector table.
struct StubEncoder {
    vectors: HashMap<String, Embedding>,
}

#[async_trait]
impl Encoder for StubEncoder {
    fn model(&self) -> &str {
        "stub"
    }

    fn dimension(&self) -> usize {
        3
    }

    async fn encode(&self, text: &str) -> postforge_embeddings::Result<Embedding> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::Api(format!("no fixture for {text:?}")))
    }
}

/// Encoder whose backend is always down.
struct DownEncoder;

#[async_trait]
impl Encoder for DownEncoder {
    fn model(&self) -> &str {
        "down"
    }

    fn dimension(&self) -> usize {
        3
    }

    async fn encode(&self, _text: &str) -> postforge_embeddings::Result<Embedding> {
        Err(EmbeddingError::Api("backend unavailable".to_string()))
    }
}

fn test_catalog() -> CatalogState {
    let entries = vec![
        CatalogEntry {
            id: "t1".to_string(),
            embedding: vec![1.0, 0.0, 0.0],
        },
        CatalogEntry {
            id: "t2".to_string(),
            embedding: vec![0.0, 1.0, 0.0],
        },
        CatalogEntry {
            id: "t3".to_string(),
            embedding: vec![0.0, 0.0, 1.0],
        },
    ];
    CatalogState::Loaded(TemplateCatalog::new(entries).unwrap())
}

fn router_with(encoder: Arc<dyn Encoder>, catalog: CatalogState) -> Router {
    let ranker = Arc::new(TemplateRanker::new(catalog, encoder));
    build_router(Arc::new(AppState { ranker }))
}

fn test_router() -> Router {
    let mut vectors = HashMap::new();
    vectors.insert(
        "We just closed our seed round".to_string(),
        vec![0.9, 0.3, 0.1],
    );
    router_with(Arc::new(StubEncoder { vectors }), test_catalog())
}

async fn post_suggest(router: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/suggest-templates")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn suggest_returns_ranked_templates() {
    let (status, body) = post_suggest(
        test_router(),
        serde_json::json!({"query_text": "We just closed our seed round", "top_k": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let suggestions: Vec<Suggestion> = serde_json::from_value(body).unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].template_id, "t1");
    assert!(suggestions[0].similarity_score >= suggestions[1].similarity_score);
}

#[tokio::test]
async fn top_k_defaults_to_three() {
    let (status, body) = post_suggest(
        test_router(),
        serde_json::json!({"query_text": "We just closed our seed round"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let suggestions: Vec<Suggestion> = serde_json::from_value(body).unwrap();
    assert_eq!(suggestions.len(), 3);
}

#[tokio::test]
async fn whitespace_query_returns_empty_list() {
    let (status, body) = post_suggest(
        test_router(),
        serde_json::json!({"query_text": "   ", "top_k": 3}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn negative_top_k_returns_empty_list() {
    let (status, body) = post_suggest(
        test_router(),
        serde_json::json!({"query_text": "We just closed our seed round", "top_k": -5}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn encoder_down_maps_to_service_unavailable() {
    let router = router_with(Arc::new(DownEncoder), test_catalog());
    let (status, body) = post_suggest(
        router,
        serde_json::json!({"query_text": "We just closed our seed round", "top_k": 3}),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "ranking_unavailable");
}

#[tokio::test]
async fn missing_catalog_degrades_to_empty_results() {
    let router = router_with(Arc::new(DownEncoder), CatalogState::Unavailable);
    let (status, body) = post_suggest(
        router,
        serde_json::json!({"query_text": "We just closed our seed round", "top_k": 3}),
    )
    .await;

    // The encoder is never reached: no catalog, nothing to rank.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn health_reports_catalog_state() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["catalog"], "loaded");
}

#[tokio::test]
async fn health_reports_missing_catalog() {
    let router = router_with(Arc::new(DownEncoder), CatalogState::Unavailable);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["catalog"], "unavailable");
}
