//! Request and response types for text embeddings.
//!
//! Document-time and query-time embeddings are computed with different
//! [`TaskType`]s even for identical text; retrieval quality depends on the
//! asymmetric embedding objectives, so the task type is part of the wire
//! contract rather than a cosmetic hint.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{Error, GeminiClient};
use crate::generation::Content;

/// The retrieval intent of an embedding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// The text is a document being indexed for later retrieval.
    RetrievalDocument,
    /// The text is a query used to search indexed documents.
    RetrievalQuery,
}

/// The `embedContent` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedContentRequest {
    pub model: String,
    pub content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dimensionality: Option<i32>,
}

/// A fixed-length embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEmbedding {
    pub values: Vec<f32>,
}

/// The `embedContent` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEmbeddingResponse {
    pub embedding: ContentEmbedding,
}

/// Fluent builder for an `embedContent` request.
pub struct EmbedBuilder {
    client: Arc<GeminiClient>,
    text: String,
    task_type: Option<TaskType>,
    output_dimensionality: Option<i32>,
}

impl EmbedBuilder {
    pub(crate) fn new(client: Arc<GeminiClient>) -> Self {
        Self { client, text: String::new(), task_type: None, output_dimensionality: None }
    }

    /// Set the text to embed.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the retrieval task type for this request.
    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Truncate the output vector to the given dimensionality.
    pub fn with_output_dimensionality(mut self, dims: i32) -> Self {
        self.output_dimensionality = Some(dims);
        self
    }

    /// Execute the request.
    pub async fn execute(self) -> Result<ContentEmbeddingResponse, Error> {
        let request = EmbedContentRequest {
            model: self.client.model.to_string(),
            content: Content::text(self.text),
            task_type: self.task_type,
            output_dimensionality: self.output_dimensionality,
        };
        self.client.embed_content(request).await
    }
}
