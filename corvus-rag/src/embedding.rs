//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// The retrieval intent of an embedding call.
///
/// Document-time and query-time embeddings are computed with different
/// intents even for identical text. Mixing them up is a correctness bug,
/// not a style choice: retrieval quality depends on the asymmetric
/// embedding objectives. The intent is therefore a required per-call
/// argument, never a provider default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    /// The text is a document chunk being indexed.
    Document,
    /// The text is a query used to search the index.
    Query,
}

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap specific embedding backends behind a unified async
/// interface. Every call performs one outbound request; there is no caching
/// and no retry here. The caller decides whether to retry or abort.
///
/// # Example
///
/// ```rust,ignore
/// use corvus_rag::{EmbeddingProvider, EmbeddingTask};
///
/// let embedding = provider.embed("hello world", EmbeddingTask::Query).await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// The default implementation calls [`embed`](EmbeddingProvider::embed)
    /// sequentially for each input, awaiting each call before issuing the
    /// next. Override this method if the backend supports native batching.
    async fn embed_batch(&self, texts: &[&str], task: EmbeddingTask) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text, task).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
