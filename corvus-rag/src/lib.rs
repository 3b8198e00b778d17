//! # corvus-rag
//!
//! The retrieval engine behind Corvus: split uploaded documents into
//! chunks, embed them with a retrieval-document task type, store the
//! vectors, and answer queries by embedding them with a retrieval-query
//! task type and ranking stored chunks by cosine similarity.
//!
//! The moving parts are traits so backends stay pluggable:
//!
//! - [`Chunker`] with [`FixedSizeChunker`] — contiguous, non-overlapping
//!   character chunks
//! - [`EmbeddingProvider`] — task-typed embeddings
//!   ([`GeminiEmbeddingProvider`] behind the `gemini` feature)
//! - [`VectorStore`] — [`InMemoryVectorStore`] always available,
//!   [`PineconeVectorStore`](pinecone::PineconeVectorStore) behind the
//!   `pinecone` feature
//! - [`RagPipeline`] — the ingest/query orchestrator composing the above
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use corvus_rag::{Document, FixedSizeChunker, InMemoryVectorStore, RagConfig, RagPipeline};
//!
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new(config.output_dimensionality)))
//!     .chunker(Arc::new(FixedSizeChunker::new(config.chunk_size)?))
//!     .build()?;
//!
//! pipeline.ingest(&Document::new(text, "notes.txt")).await?;
//! let matches = pipeline.query("what does the architecture look like?").await?;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod inmemory;
#[cfg(feature = "pinecone")]
pub mod pinecone;
pub mod pipeline;
pub mod prompt;
pub mod similarity;
pub mod vectorstore;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::RagConfig;
pub use document::{Chunk, Document, SearchResult};
pub use embedding::{EmbeddingProvider, EmbeddingTask};
pub use error::{RagError, Result};
#[cfg(feature = "gemini")]
pub use gemini::GeminiEmbeddingProvider;
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "pinecone")]
pub use pinecone::PineconeVectorStore;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use vectorstore::VectorStore;
