//! Gemini embedding provider using the `corvus-gemini` crate.
//!
//! This module is only available when the `gemini` feature is enabled.

use async_trait::async_trait;
use tracing::{debug, error};

use corvus_gemini::{Gemini, Model, TaskType};

use crate::embedding::{EmbeddingProvider, EmbeddingTask};
use crate::error::{RagError, Result};

/// An [`EmbeddingProvider`] backed by the Gemini embedding API.
///
/// Wraps a [`corvus_gemini::Gemini`] client bound to the embedding model
/// and maps [`EmbeddingTask`] onto the wire task types:
/// [`EmbeddingTask::Document`] → `RETRIEVAL_DOCUMENT`,
/// [`EmbeddingTask::Query`] → `RETRIEVAL_QUERY`.
///
/// # Example
///
/// ```rust,ignore
/// use corvus_rag::{EmbeddingTask, GeminiEmbeddingProvider};
///
/// let provider = GeminiEmbeddingProvider::new("your-api-key")?;
/// let embedding = provider.embed("hello world", EmbeddingTask::Document).await?;
/// ```
pub struct GeminiEmbeddingProvider {
    client: Gemini,
    output_dimensionality: i32,
}

impl GeminiEmbeddingProvider {
    /// Default embedding dimensionality requested from `gemini-embedding-001`.
    const DEFAULT_DIMENSIONS: i32 = 768;

    /// Create a new provider using the given API key and the default
    /// `gemini-embedding-001` model.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        let client = Gemini::with_model(api_key, Model::GeminiEmbedding001).map_err(|e| {
            RagError::EmbeddingError {
                provider: "Gemini".into(),
                message: format!("failed to create Gemini client: {e}"),
            }
        })?;

        Ok(Self { client, output_dimensionality: Self::DEFAULT_DIMENSIONS })
    }

    /// Create a new provider from an existing [`Gemini`] client.
    ///
    /// Use this when you need full control over the client configuration
    /// (e.g. a custom base URL).
    pub fn from_client(client: Gemini) -> Self {
        Self { client, output_dimensionality: Self::DEFAULT_DIMENSIONS }
    }

    /// Set the output dimensionality (truncates the embedding vector).
    pub fn with_output_dimensionality(mut self, dims: i32) -> Self {
        self.output_dimensionality = dims;
        self
    }

    fn task_type(task: EmbeddingTask) -> TaskType {
        match task {
            EmbeddingTask::Document => TaskType::RetrievalDocument,
            EmbeddingTask::Query => TaskType::RetrievalQuery,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>> {
        debug!(provider = "Gemini", text_len = text.len(), ?task, "embedding text");

        let response = self
            .client
            .embed_content()
            .with_text(text)
            .with_task_type(Self::task_type(task))
            .with_output_dimensionality(self.output_dimensionality)
            .execute()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "embedding request failed");
                RagError::EmbeddingError { provider: "Gemini".into(), message: format!("{e}") }
            })?;

        let values = response.embedding.values;
        if values.is_empty() {
            error!(provider = "Gemini", "response carried no vector data");
            return Err(RagError::EmbeddingError {
                provider: "Gemini".into(),
                message: "response carried no vector data".into(),
            });
        }

        Ok(values)
    }

    fn dimensions(&self) -> usize {
        self.output_dimensionality as usize
    }
}
