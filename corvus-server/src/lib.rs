//! # corvus-server
//!
//! HTTP surface for the Corvus retrieval-augmented generation backend.
//!
//! Routes:
//!
//! - `GET /health` — liveness probe
//! - `POST /api/upload` — multipart document upload (field `file`);
//!   chunks, embeds, and stores the document, returning `{documentId}`
//! - `POST /api/chat` — RAG-prompt profile: retrieve context, assemble a
//!   context-restricted prompt, single generation call, no tools
//! - `POST /api/generate` — conversational profile: history + system
//!   instruction + tool declarations, driven through the single-round
//!   function-call dispatcher
//! - `POST /api/ask` — query-restricted profile against the configured
//!   fine-tuned model variant
//!
//! The handlers hold their collaborators behind trait objects
//! ([`corvus_rag::EmbeddingProvider`], [`corvus_rag::VectorStore`],
//! [`corvus_tool::ChatModel`]) so tests can drive the full router with
//! scripted backends and no network.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
