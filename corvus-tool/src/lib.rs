//! # corvus-tool
//!
//! The function-calling side of Corvus: a [`Tool`] trait for operations the
//! generative model may invoke, a [`ToolRegistry`] mapping declared names to
//! handlers, and a [`Dispatcher`] that runs the single-round call protocol
//! (one generation call, independent execution of every requested
//! invocation, one batched tool-result turn, exactly one follow-up call).
//!
//! Shipped tools:
//!
//! - [`WeatherTool`] — current weather for a location (GET with query string)
//! - [`MeetingTool`] — meeting creation behind a client-credentials token
//!   exchange
//! - [`RetrievalTool`] — recursive retrieval against the
//!   [`RagPipeline`](corvus_rag::RagPipeline)
//!
//! The dispatcher talks to the model through the [`ChatModel`] seam so tests
//! can script responses without a network.

pub mod chat;
pub mod dispatch;
pub mod error;
pub mod meeting;
pub mod retrieval;
pub mod tool;
pub mod weather;

pub use chat::{ChatModel, ChatOptions, GeminiChatModel};
pub use dispatch::Dispatcher;
pub use error::{DispatchError, ToolError};
pub use meeting::{MeetingConfig, MeetingTool};
pub use retrieval::RetrievalTool;
pub use tool::{Tool, ToolRegistry};
pub use weather::WeatherTool;
