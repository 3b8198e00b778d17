//! In-memory vector store using cosine similarity.
//!
//! This module provides [`InMemoryVectorStore`], a zero-dependency vector
//! store backed by an append-only `Vec` protected by a
//! `tokio::sync::RwLock`. It is suitable for development, testing, and
//! small corpora; nothing survives a process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::similarity;
use crate::vectorstore::VectorStore;

/// An in-memory vector store using cosine similarity for search.
///
/// Entries live in insertion order in a single sequence. Queries take a
/// read lock and operate over the entries present at call start (snapshot
/// discipline); concurrent uploads append without disturbing readers.
/// Every query is an O(n) scan followed by a stable top-k selection, so
/// tied scores resolve to insertion order.
///
/// Re-upserting an existing chunk `id` replaces that entry in place.
///
/// The store checks dimensionality explicitly: vectors that disagree with
/// the dimensionality fixed at construction are rejected with
/// [`RagError::DimensionMismatch`].
#[derive(Debug)]
pub struct InMemoryVectorStore {
    dimensions: usize,
    entries: RwLock<Vec<Chunk>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store holding `dimensions`-dimensional vectors.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, entries: RwLock::new(Vec::new()) }
    }

    /// Number of entries currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            self.check_dimensions(&chunk.embedding)?;
        }

        let mut entries = self.entries.write().await;
        for chunk in chunks {
            match entries.iter_mut().find(|entry| entry.id == chunk.id) {
                Some(existing) => *existing = chunk.clone(),
                None => entries.push(chunk.clone()),
            }
        }
        Ok(())
    }

    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<SearchResult>> {
        self.check_dimensions(embedding)?;

        let entries = self.entries.read().await;
        let results = similarity::top_k(embedding, &entries, top_k)
            .into_iter()
            .map(|(chunk, score)| SearchResult {
                text: chunk.text.clone(),
                score,
                document_id: include_metadata.then(|| chunk.document_id.clone()),
                source_name: include_metadata.then(|| chunk.source_name.clone()),
            })
            .collect();

        Ok(results)
    }
}
