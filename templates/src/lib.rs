//! # Templates
//!
//! Template catalog and similarity ranking for Postforge.
//!
//! A catalog of pre-computed template embeddings is loaded once at startup
//! and ranked against user prompts by cosine similarity:
//!
//! ```text
//! prompt ──► Encoder ──► query embedding
//!                             │
//!                             ▼
//!            TemplateCatalog ──► cosine scores ──► top-k Suggestions
//! ```
//!
//! The catalog never changes after load, so any number of concurrent
//! `suggest` calls share it without synchronization.

pub mod catalog;
pub mod error;
pub mod ranker;

pub use catalog::{CatalogEntry, CatalogState, TemplateCatalog};
pub use error::{Result, TemplateError};
pub use ranker::{Suggestion, TemplateRanker};
