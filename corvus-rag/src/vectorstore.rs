//! Vector store trait for storing and searching vector embeddings.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A storage backend for vector embeddings with similarity search.
///
/// Entries are append-only in this system: there is no update or delete.
/// Upserting is idempotent per chunk `id`, with backend-specific semantics:
/// the in-memory store replaces an existing id in place, and remote indexes
/// apply their own id-replacement rules. Each implementation documents its
/// behavior.
///
/// # Example
///
/// ```rust,ignore
/// use corvus_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new(768);
/// store.upsert(&chunks).await?;
/// let results = store.query(&query_embedding, 5, true).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upsert chunks into the store. Chunks must have embeddings set.
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()>;

    /// Search for the `top_k` chunks most similar to the given embedding.
    ///
    /// Returns at most `top_k` results ordered by descending relevance.
    /// When `include_metadata` is false the backend may omit document
    /// metadata from the results.
    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<SearchResult>>;
}
