//! Single-round function-call dispatch.
//!
//! The dispatcher drives one conversation round against the model:
//!
//! ```text
//! AWAITING_MODEL ──FinalAnswer──────────────────────────────▶ DONE
//!       │
//!       └─ToolCalls──▶ EXECUTING_TOOLS ──▶ AWAITING_FOLLOWUP ──▶ DONE
//! ```
//!
//! Every requested invocation executes independently; a failure (or an
//! unmapped tool name) becomes an error-shaped payload inside that
//! invocation's result rather than aborting the round. All results are
//! batched into a single tool turn, and exactly one follow-up generation
//! call is issued. Dispatch is single-round: a follow-up that requests
//! further tools is surfaced as an error, never dispatched again.

use std::sync::Arc;

use corvus_gemini::{Content, FunctionCall, FunctionResponse, GenerationResult};
use serde_json::json;
use tracing::{error, info, warn};

use crate::chat::{ChatModel, ChatOptions};
use crate::error::{DispatchError, ToolError};
use crate::tool::ToolRegistry;

/// Runs the tool-call protocol for one request.
pub struct Dispatcher {
    model: Arc<dyn ChatModel>,
    registry: ToolRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over a generation backend and a fixed registry.
    pub fn new(model: Arc<dyn ChatModel>, registry: ToolRegistry) -> Self {
        Self { model, registry }
    }

    /// The registry this dispatcher resolves tool names against.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one conversation round and return the final answer text.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Generation`] if a generation call fails or
    /// comes back empty, and [`DispatchError::UnresolvedToolCalls`] if the
    /// follow-up call requests further tools.
    pub async fn run(
        &self,
        mut conversation: Vec<Content>,
        options: &ChatOptions,
    ) -> Result<String, DispatchError> {
        let calls = match self.model.generate(conversation.clone(), options).await? {
            GenerationResult::FinalAnswer(text) => return Ok(text),
            GenerationResult::ToolCalls(calls) => calls,
        };

        info!(call_count = calls.len(), "model requested tool invocations");
        let responses = self.execute_all(&calls).await;

        // The model's call turn and the batched results are appended in
        // order, then exactly one follow-up call is issued.
        conversation.push(Content::model_function_calls(calls));
        conversation.push(Content::function_responses(responses));

        match self.model.generate(conversation, options).await? {
            GenerationResult::FinalAnswer(text) => Ok(text),
            GenerationResult::ToolCalls(calls) => {
                warn!(call_count = calls.len(), "follow-up response requested further tools");
                Err(DispatchError::UnresolvedToolCalls)
            }
        }
    }

    /// Execute every requested invocation, in request order.
    ///
    /// Each call yields exactly one [`FunctionResponse`]; failures are
    /// captured as `{"error": ...}` payloads so the model can react to them
    /// in the follow-up turn.
    async fn execute_all(&self, calls: &[FunctionCall]) -> Vec<FunctionResponse> {
        let mut responses = Vec::with_capacity(calls.len());

        for call in calls {
            let response = match self.registry.get(&call.name) {
                None => {
                    let err = ToolError::UnknownTool { name: call.name.clone() };
                    warn!(tool = %call.name, "model requested an unmapped tool");
                    json!({ "error": err.to_string() })
                }
                Some(tool) => match tool.execute(call.args.clone()).await {
                    Ok(payload) => payload,
                    Err(e) => {
                        error!(tool = %call.name, error = %e, "tool execution failed");
                        json!({ "error": e.to_string() })
                    }
                },
            };

            responses.push(FunctionResponse { name: call.name.clone(), response });
        }

        responses
    }
}
