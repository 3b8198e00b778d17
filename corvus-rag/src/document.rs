//! Data types for documents, chunks, and retrieval matches.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded source document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// The original filename the document was uploaded under.
    pub source_name: String,
}

impl Document {
    /// Create a document with a generated id.
    pub fn new(text: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), text: text.into(), source_name: source_name.into() }
    }
}

/// A segment of a [`Document`] with its vector embedding.
///
/// Chunks are the unit of retrieval. They are created during chunking,
/// embedded exactly once, and never mutated after being stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk.
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// The ID of the parent [`Document`].
    pub document_id: String,
    /// The filename of the parent document.
    pub source_name: String,
    /// Position of this chunk within the source document.
    pub sequence_index: usize,
}

/// A retrieved chunk paired with a relevance score.
///
/// Derived per query, never persisted. Metadata fields are present only
/// when the backend returned them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk text.
    pub text: String,
    /// The similarity score (higher is more relevant; cosine measure is in [-1, 1]).
    pub score: f32,
    /// The ID of the document the chunk came from, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// The filename the chunk came from, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}
