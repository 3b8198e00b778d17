//! Error types for the `corvus-tool` crate.

use thiserror::Error;

/// Errors scoped to one tool invocation.
///
/// These never abort a dispatch round: the [`Dispatcher`](crate::Dispatcher)
/// folds them into the invocation's result payload so the model can react.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model requested a tool name with no registered handler.
    #[error("unknown tool '{name}' requested by the model")]
    UnknownTool {
        /// The unmapped tool name.
        name: String,
    },

    /// The invocation arguments were missing or malformed.
    #[error("invalid arguments for tool '{tool}': {message}")]
    InvalidArguments {
        /// The tool that rejected its arguments.
        tool: String,
        /// A description of what was wrong.
        message: String,
    },

    /// The tool's outbound call failed.
    #[error("tool '{tool}' failed: {message}")]
    Execution {
        /// The tool that failed.
        tool: String,
        /// A description of the failure.
        message: String,
    },

    /// A credential exchange required by the tool failed.
    #[error("credential exchange failed: {message}")]
    Auth {
        /// A description of the failure.
        message: String,
    },
}

/// Errors from the dispatch round itself.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The generation service failed or returned an empty response.
    #[error(transparent)]
    Generation(#[from] corvus_gemini::Error),

    /// The follow-up call requested further tool calls. Dispatch is
    /// single-round, so this is surfaced as a service inconsistency rather
    /// than silently returning whatever text happens to be present.
    #[error("follow-up response requested further tool calls")]
    UnresolvedToolCalls,
}
