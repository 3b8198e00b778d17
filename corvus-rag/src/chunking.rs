//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`FixedSizeChunker`],
//! which splits text into contiguous, non-overlapping character chunks.
//! Concatenating the chunks of a document reproduces its text exactly.

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no
/// embeddings. Embeddings are attached later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text. Each returned
    /// chunk has an empty embedding vector and a `sequence_index` matching
    /// its position in the source text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into contiguous chunks of at most `chunk_size` characters.
///
/// Chunks never overlap and the final chunk may be shorter. Chunk IDs are
/// generated as `{document_id}_{sequence_index}`.
///
/// # Example
///
/// ```rust,ignore
/// use corvus_rag::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(1000)?;
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::ConfigError(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { chunk_size })
    }

    /// The maximum chunk length in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

/// Iterate over contiguous `chunk_size`-character windows of `text`.
///
/// The iterator is deterministic and restartable: it borrows the text and
/// keeps no state beyond its own cursor, so calling it twice yields the
/// same sequence.
pub fn split_chars(text: &str, chunk_size: usize) -> impl Iterator<Item = &str> {
    debug_assert!(chunk_size > 0);
    let mut start = 0;
    std::iter::from_fn(move || {
        if start >= text.len() {
            return None;
        }
        let end = text[start..]
            .char_indices()
            .nth(chunk_size)
            .map(|(offset, _)| start + offset)
            .unwrap_or(text.len());
        let piece = &text[start..end];
        start = end;
        Some(piece)
    })
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        split_chars(&document.text, self.chunk_size)
            .enumerate()
            .map(|(sequence_index, text)| Chunk {
                id: format!("{}_{sequence_index}", document.id),
                text: text.to_string(),
                embedding: Vec::new(),
                document_id: document.id.clone(),
                source_name: document.source_name.clone(),
                sequence_index,
            })
            .collect()
    }
}
