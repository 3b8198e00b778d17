//! Seam between the dispatcher and the generation backend.
//!
//! The [`ChatModel`] trait carries exactly what one generation call needs:
//! the conversation so far plus per-request options. [`GeminiChatModel`]
//! adapts a [`corvus_gemini::Gemini`] client; tests substitute a scripted
//! implementation.

use async_trait::async_trait;
use corvus_gemini::{
    Content, FunctionDeclaration, Gemini, GenerationConfig, GenerationResult, SafetySetting,
    Tool as GeminiTool,
};

use crate::error::DispatchError;

/// Per-request generation options.
///
/// Safety settings are a compliance control and travel through to the API
/// unmodified on every call.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Optional system instruction prepended to the request.
    pub system_instruction: Option<String>,
    /// Function declarations offered to the model. Empty means no tools.
    pub tools: Vec<FunctionDeclaration>,
    /// Safety settings forwarded verbatim.
    pub safety_settings: Vec<SafetySetting>,
    /// Optional sampling parameters.
    pub generation_config: Option<GenerationConfig>,
}

/// A generation backend the dispatcher can call.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one generation call over the given conversation.
    async fn generate(
        &self,
        conversation: Vec<Content>,
        options: &ChatOptions,
    ) -> Result<GenerationResult, DispatchError>;
}

/// A [`ChatModel`] backed by the Gemini API.
pub struct GeminiChatModel {
    client: Gemini,
}

impl GeminiChatModel {
    /// Wrap an existing [`Gemini`] client.
    pub fn new(client: Gemini) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatModel for GeminiChatModel {
    async fn generate(
        &self,
        conversation: Vec<Content>,
        options: &ChatOptions,
    ) -> Result<GenerationResult, DispatchError> {
        let mut builder = self.client.generate_content().with_history(conversation);

        if let Some(instruction) = &options.system_instruction {
            builder = builder.with_system_instruction(instruction.clone());
        }
        if !options.tools.is_empty() {
            builder = builder.with_tool(GeminiTool::new(options.tools.clone()));
        }
        if !options.safety_settings.is_empty() {
            builder = builder.with_safety_settings(options.safety_settings.clone());
        }
        if let Some(config) = &options.generation_config {
            builder = builder.with_generation_config(config.clone());
        }

        let response = builder.execute().await?;
        Ok(response.into_result()?)
    }
}
