//! Offline catalog builder.
//!
//! Encodes a template definition file into the catalog artifact the server
//! loads at startup. Run whenever templates are added or reworded:
//!
//! ```text
//! build-catalog --templates templates.json --output models/catalog.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use postforge_embeddings::{DEFAULT_DIMENSION, DEFAULT_MODEL, Encoder, HttpEncoder};
use postforge_templates::{CatalogEntry, TemplateCatalog};
use serde::Deserialize;

/// Encode a template definition file into a catalog artifact.
#[derive(Parser)]
#[command(name = "build-catalog")]
struct Args {
    /// Template definition file: a JSON array of {id, name, category}.
    #[arg(long, default_value = "templates.json")]
    templates: PathBuf,

    /// Where to write the catalog artifact.
    #[arg(long, default_value = "models/catalog.json")]
    output: PathBuf,

    /// Embedding API base URL.
    #[arg(long, env = "EMBEDDINGS_BASE_URL")]
    base_url: String,

    /// Bearer token for the embedding API.
    #[arg(long, env = "EMBEDDINGS_API_KEY")]
    api_key: Option<String>,

    /// Model to encode with.
    #[arg(long, env = "EMBEDDINGS_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Expected embedding dimension.
    #[arg(long, env = "EMBEDDINGS_DIMENSION", default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,
}

/// One template definition, as exported from the content database.
#[derive(Debug, Deserialize)]
struct TemplateDef {
    id: String,
    name: String,
    category: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let content = std::fs::read_to_string(&args.templates)
        .with_context(|| format!("reading {}", args.templates.display()))?;
    let defs: Vec<TemplateDef> = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", args.templates.display()))?;

    let mut encoder = HttpEncoder::new(args.base_url.as_str())
        .with_model(args.model.as_str())
        .with_dimension(args.dimension);
    if let Some(key) = &args.api_key {
        encoder = encoder.with_api_key(key.as_str());
    }

    // Templates are embedded as "name: category", the same text queries are
    // ranked against at serve time.
    let texts: Vec<String> = defs
        .iter()
        .map(|d| format!("{}: {}", d.name, d.category))
        .collect();

    println!("Encoding {} templates with {}...", defs.len(), args.model);
    let embeddings = encoder.encode_batch(&texts).await?;

    let entries: Vec<CatalogEntry> = defs
        .into_iter()
        .zip(embeddings)
        .map(|(def, embedding)| CatalogEntry {
            id: def.id,
            embedding,
        })
        .collect();

    // Validates unique ids and one shared dimension before anything is
    // written to disk.
    let catalog = TemplateCatalog::new(entries)?;

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(
        &args.output,
        serde_json::to_string_pretty(catalog.entries())?,
    )?;

    println!(
        "Wrote {} template embeddings to {}",
        catalog.len(),
        args.output.display()
    );

    Ok(())
}
