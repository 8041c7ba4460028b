//! In-memory cache of computed embeddings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::Embedding;
use crate::encoder::Encoder;
use crate::error::Result;

/// Cached embedding plus its insertion order, for eviction.
struct CacheEntry {
    embedding: Embedding,
    inserted_at: u64,
}

/// Wraps an encoder with a bounded in-memory cache.
///
/// Caching is sound because encoders are deterministic for a fixed model
/// version. The model is fixed per wrapped encoder, so entries are keyed by
/// text alone. A capacity of 0 disables caching and delegates every call.
pub struct CachedEncoder<E> {
    inner: E,
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_entries: usize,
    clock: AtomicU64,
}

impl<E: Encoder> CachedEncoder<E> {
    /// Wrap `inner` with a cache holding at most `max_entries` embeddings.
    pub fn new(inner: E, max_entries: usize) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
            max_entries,
            clock: AtomicU64::new(0),
        }
    }

    /// Number of embeddings currently cached.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn lookup(&self, text: &str) -> Option<Embedding> {
        self.entries
            .read()
            .await
            .get(text)
            .map(|e| e.embedding.clone())
    }

    async fn insert(&self, text: &str, embedding: Embedding) {
        let mut entries = self.entries.write().await;

        // Evict the oldest entry at capacity.
        if entries.len() >= self.max_entries && !entries.contains_key(text) {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            text.to_string(),
            CacheEntry {
                embedding,
                inserted_at: self.clock.fetch_add(1, Ordering::Relaxed),
            },
        );
    }
}

#[async_trait]
impl<E: Encoder> Encoder for CachedEncoder<E> {
    fn model(&self) -> &str {
        self.inner.model()
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    async fn encode(&self, text: &str) -> Result<Embedding> {
        if self.max_entries == 0 {
            return self.inner.encode(text).await;
        }

        if let Some(embedding) = self.lookup(text).await {
            debug!("embedding cache hit");
            return Ok(embedding);
        }

        let embedding = self.inner.encode(text).await?;
        self.insert(text, embedding.clone()).await;
        Ok(embedding)
    }

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if self.max_entries == 0 {
            return self.inner.encode_batch(texts).await;
        }

        let mut results: Vec<Option<Embedding>> = vec![None; texts.len()];
        let mut misses: Vec<usize> = Vec::new();
        {
            let entries = self.entries.read().await;
            for (i, text) in texts.iter().enumerate() {
                match entries.get(text) {
                    Some(e) => results[i] = Some(e.embedding.clone()),
                    None => misses.push(i),
                }
            }
        }

        if !misses.is_empty() {
            let miss_texts: Vec<String> = misses.iter().map(|&i| texts[i].clone()).collect();
            let fetched = self.inner.encode_batch(&miss_texts).await?;
            for (&i, embedding) in misses.iter().zip(fetched) {
                self.insert(&texts[i], embedding.clone()).await;
                results[i] = Some(embedding);
            }
        }

        Ok(results.into_iter().flatten().collect())
    }
}
