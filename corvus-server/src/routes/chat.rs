//! RAG-prompt chat endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use corvus_gemini::{Content, GenerationResult};
use corvus_rag::prompt;
use corvus_tool::ChatOptions;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /api/chat` — the RAG-prompt profile.
///
/// Retrieves the most relevant stored chunks for the query, assembles a
/// context-restricted prompt, and makes a single generation call with no
/// tools and no history. An empty store does not short-circuit: the prompt
/// simply carries an empty context section and the model says the context
/// is insufficient.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let matches = state.pipeline.query(&request.query).await?;
    let context: Vec<String> = matches.into_iter().map(|m| m.text).collect();
    let prompt = prompt::assemble(&context, &request.query);

    let options = ChatOptions {
        system_instruction: None,
        tools: Vec::new(),
        safety_settings: state.safety_settings.clone(),
        generation_config: Some(state.generation_config.clone()),
    };

    match state.rag_model.generate(vec![Content::user(prompt)], &options).await? {
        GenerationResult::FinalAnswer(text) => Ok(Json(ChatResponse { response: text })),
        // No tools are declared on this profile; a call request is a
        // service contract violation, same class as an empty response.
        GenerationResult::ToolCalls(_) => {
            Err(ApiError::Generation(corvus_gemini::Error::EmptyResponse))
        }
    }
}
