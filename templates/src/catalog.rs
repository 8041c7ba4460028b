//! The template catalog.

use std::collections::HashSet;
use std::path::Path;

use postforge_embeddings::Embedding;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TemplateError};

/// One catalog entry: a template identifier and its pre-computed embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique template identifier.
    pub id: String,

    /// Embedding of the template's source text.
    pub embedding: Embedding,
}

/// A fixed, ordered catalog of template embeddings.
///
/// Entry order is significant: equal similarity scores rank earlier entries
/// first. The catalog is immutable after construction, so concurrent readers
/// need no synchronization.
pub struct TemplateCatalog {
    entries: Vec<CatalogEntry>,
    dimension: usize,
}

impl TemplateCatalog {
    /// Build a catalog, validating that ids are unique and all embeddings
    /// share one dimension.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let Some(first) = entries.first() else {
            return Err(TemplateError::EmptyCatalog);
        };
        let dimension = first.embedding.len();

        {
            let mut seen = HashSet::with_capacity(entries.len());
            for entry in &entries {
                if entry.embedding.len() != dimension {
                    return Err(TemplateError::EntryDimension {
                        id: entry.id.clone(),
                        expected: dimension,
                        actual: entry.embedding.len(),
                    });
                }
                if !seen.insert(entry.id.as_str()) {
                    return Err(TemplateError::DuplicateId(entry.id.clone()));
                }
            }
        }

        Ok(Self { entries, dimension })
    }

    /// Load a catalog artifact (a JSON array of entries) from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&content)?;
        let catalog = Self::new(entries)?;
        info!(
            templates = catalog.len(),
            dimension = catalog.dimension(),
            "loaded template catalog"
        );
        Ok(catalog)
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of templates in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries. Always false for a validated
    /// catalog; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared dimension of every embedding in the catalog.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether a template id exists in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

/// Whether the template catalog was available at startup.
///
/// A missing model artifact degrades the suggest operation to empty results
/// instead of taking the whole service down; the state is explicit so callers
/// cannot forget to handle the unavailable case.
pub enum CatalogState {
    /// Catalog loaded and ready to rank against.
    Loaded(TemplateCatalog),

    /// Catalog artifact missing or unreadable.
    Unavailable,
}

impl CatalogState {
    /// Load the artifact at `path`, degrading to [`CatalogState::Unavailable`]
    /// on any failure. The failure is logged once, here.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match TemplateCatalog::load(&path) {
            Ok(catalog) => Self::Loaded(catalog),
            Err(err) => {
                warn!(
                    path = %path.as_ref().display(),
                    %err,
                    "template catalog unavailable, suggestions will be empty"
                );
                Self::Unavailable
            }
        }
    }

    /// The loaded catalog, if any.
    pub fn catalog(&self) -> Option<&TemplateCatalog> {
        match self {
            Self::Loaded(catalog) => Some(catalog),
            Self::Unavailable => None,
        }
    }

    /// Whether a catalog is loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}
