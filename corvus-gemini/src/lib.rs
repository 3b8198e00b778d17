//! # corvus-gemini
//!
//! Typed client for the Gemini generative-language API, covering the two
//! operations Corvus needs: content generation (with conversation history,
//! system instructions, tool declarations, and safety settings) and text
//! embeddings (with retrieval task types).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use corvus_gemini::{Gemini, GenerationResult};
//!
//! # async fn run() -> Result<(), corvus_gemini::Error> {
//! let gemini = Gemini::new("YOUR_API_KEY")?;
//!
//! let response = gemini
//!     .generate_content()
//!     .with_user_message("Explain retrieval-augmented generation in one sentence.")
//!     .execute()
//!     .await?;
//!
//! match response.into_result()? {
//!     GenerationResult::FinalAnswer(text) => println!("{text}"),
//!     GenerationResult::ToolCalls(calls) => println!("model requested {} tools", calls.len()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Embeddings are requested through the same client with a model override:
//!
//! ```rust,no_run
//! use corvus_gemini::{Gemini, Model, TaskType};
//!
//! # async fn run() -> Result<(), corvus_gemini::Error> {
//! let gemini = Gemini::with_model("YOUR_API_KEY", Model::GeminiEmbedding001)?;
//! let response = gemini
//!     .embed_content()
//!     .with_text("hello world")
//!     .with_task_type(TaskType::RetrievalDocument)
//!     .with_output_dimensionality(768)
//!     .execute()
//!     .await?;
//! assert_eq!(response.embedding.values.len(), 768);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod embedding;
pub mod generation;

#[cfg(test)]
mod response_parsing_tests;

pub use client::{Error, Gemini, Model};
pub use embedding::{ContentEmbedding, ContentEmbeddingResponse, EmbedBuilder, TaskType};
pub use generation::{
    Candidate, Content, ContentBuilder, FunctionCall, FunctionDeclaration, FunctionResponse,
    GenerationConfig, GenerationResponse, GenerationResult, HarmBlockThreshold, HarmCategory,
    Part, Role, SafetySetting, Tool,
};
