//! Request and response types for content generation.
//!
//! The wire shapes follow the `generateContent` endpoint: a request carries
//! role-tagged [`Content`] turns, an optional system instruction, optional
//! [`Tool`] declarations, safety settings, and a generation config; a
//! response carries candidates whose parts are either text or function
//! calls. [`GenerationResponse::into_result`] collapses a response into the
//! tagged [`GenerationResult`] the rest of the workspace branches on.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{Error, GeminiClient};

/// The author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A function invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// The structured outcome of executing a requested function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// One piece of a conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponse,
    },
}

/// A role-tagged conversation turn.
///
/// The role is optional on the wire: system instructions are sent as bare
/// part lists without a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A `user` turn containing a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Some(Role::User), parts: vec![Part::Text { text: text.into() }] }
    }

    /// A `model` turn containing a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Some(Role::Model), parts: vec![Part::Text { text: text.into() }] }
    }

    /// A role-less turn, used for system instructions and embedding input.
    pub fn text(text: impl Into<String>) -> Self {
        Self { role: None, parts: vec![Part::Text { text: text.into() }] }
    }

    /// A `model` turn echoing the function calls the model requested.
    pub fn model_function_calls(calls: Vec<FunctionCall>) -> Self {
        Self {
            role: Some(Role::Model),
            parts: calls
                .into_iter()
                .map(|function_call| Part::FunctionCall { function_call })
                .collect(),
        }
    }

    /// A `user` turn batching the results of executed function calls.
    pub fn function_responses(responses: Vec<FunctionResponse>) -> Self {
        Self {
            role: Some(Role::User),
            parts: responses
                .into_iter()
                .map(|function_response| Part::FunctionResponse { function_response })
                .collect(),
        }
    }
}

/// A callable operation exposed to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    /// JSON-schema object describing the accepted arguments.
    pub parameters: Value,
}

/// A set of function declarations offered to the model in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

impl Tool {
    pub fn new(function_declarations: Vec<FunctionDeclaration>) -> Self {
        Self { function_declarations }
    }
}

/// Content-risk categories recognized by the safety filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Block thresholds recognized by the safety filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_LOW_AND_ABOVE")]
    BlockLowAndAbove,
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
    #[serde(rename = "BLOCK_NONE")]
    BlockNone,
}

/// One category-to-threshold mapping.
///
/// Safety settings are a compliance control: callers pass them through on
/// every request and nothing in this workspace rewrites them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self { category, threshold }
    }

    /// One setting per recognized category, all at the given threshold.
    pub fn all_categories(threshold: HarmBlockThreshold) -> Vec<Self> {
        [
            HarmCategory::Harassment,
            HarmCategory::HateSpeech,
            HarmCategory::SexuallyExplicit,
            HarmCategory::DangerousContent,
        ]
        .into_iter()
        .map(|category| Self::new(category, threshold))
        .collect()
    }
}

/// Sampling parameters for a generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

/// The full `generateContent` request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_settings: Option<Vec<SafetySetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One generated candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The `generateContent` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerationResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        Part::Text { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Function calls requested by the first candidate, in request order.
    pub fn function_calls(&self) -> Vec<FunctionCall> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        Part::FunctionCall { function_call } => Some(function_call.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Collapse the response into the tagged result the caller branches on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyResponse`] when the response carries neither
    /// text nor function calls. That is a service contract violation and is
    /// surfaced, never swallowed.
    pub fn into_result(self) -> Result<GenerationResult, Error> {
        let calls = self.function_calls();
        if !calls.is_empty() {
            return Ok(GenerationResult::ToolCalls(calls));
        }
        let text = self.text();
        if text.is_empty() {
            return Err(Error::EmptyResponse);
        }
        Ok(GenerationResult::FinalAnswer(text))
    }
}

/// A generation outcome: either a final answer or a set of requested tool
/// invocations that must be executed before the model can finish.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    FinalAnswer(String),
    ToolCalls(Vec<FunctionCall>),
}

/// Fluent builder for a `generateContent` request.
pub struct ContentBuilder {
    client: Arc<GeminiClient>,
    request: GenerateContentRequest,
}

impl ContentBuilder {
    pub(crate) fn new(client: Arc<GeminiClient>) -> Self {
        Self { client, request: GenerateContentRequest::default() }
    }

    /// Append prior conversation turns in order.
    pub fn with_history(mut self, history: Vec<Content>) -> Self {
        self.request.contents.extend(history);
        self
    }

    /// Append one conversation turn.
    pub fn with_content(mut self, content: Content) -> Self {
        self.request.contents.push(content);
        self
    }

    /// Append a new `user` turn containing the given text.
    pub fn with_user_message(self, text: impl Into<String>) -> Self {
        self.with_content(Content::user(text))
    }

    /// Set the system instruction for this request.
    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.request.system_instruction = Some(Content::text(text));
        self
    }

    /// Declare a set of callable functions to the model.
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.request.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    /// Attach safety settings, passed through to the API unmodified.
    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.request.safety_settings = Some(settings);
        self
    }

    /// Attach sampling parameters.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.request.generation_config = Some(config);
        self
    }

    /// The request body built so far.
    pub fn request(&self) -> &GenerateContentRequest {
        &self.request
    }

    /// Execute the request.
    pub async fn execute(self) -> Result<GenerationResponse, Error> {
        self.client.generate_content_raw(self.request).await
    }
}
