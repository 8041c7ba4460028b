use std::net::SocketAddr;
use std::sync::Arc;

use postforge_embeddings::{CachedEncoder, Encoder, HttpEncoder};
use postforge_server::{AppState, ServerConfig, build_router};
use postforge_templates::{CatalogState, TemplateRanker};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(host = %config.host, port = config.port, "starting postforge-server");

    // The catalog loads once; a missing artifact degrades suggestions to
    // empty results instead of refusing to start.
    let catalog = CatalogState::from_path(&config.catalog_path);

    let mut encoder = HttpEncoder::new(config.embeddings_base_url.as_str())
        .with_model(config.embeddings_model.as_str())
        .with_dimension(config.embeddings_dimension);
    if let Some(key) = &config.embeddings_api_key {
        encoder = encoder.with_api_key(key.as_str());
    }
    let encoder: Arc<dyn Encoder> = Arc::new(CachedEncoder::new(encoder, config.cache_entries));
    info!(model = %config.embeddings_model, "encoder initialized");

    let ranker = Arc::new(TemplateRanker::new(catalog, encoder));
    let state = Arc::new(AppState { ranker });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
