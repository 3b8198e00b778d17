//! Conversational endpoint with tool dispatch.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use corvus_gemini::Content;
use corvus_tool::ChatOptions;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::HistoryTurn;
use crate::state::AppState;

const ASSISTANT_INSTRUCTION: &str =
    "You are the Corvus assistant. Use the available tools when the user asks about the \
     weather, wants to schedule a meeting, or asks about the uploaded documents; otherwise \
     answer directly.";

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// `POST /api/generate` — the conversational profile.
///
/// Caller-supplied history plus the new user turn go through the
/// single-round function-call dispatcher: tool invocations requested by
/// the model are executed, folded back into the conversation, and exactly
/// one follow-up call produces the final answer.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let mut conversation: Vec<Content> =
        request.history.into_iter().map(HistoryTurn::into_content).collect();
    conversation.push(Content::user(request.query));

    let options = ChatOptions {
        system_instruction: Some(ASSISTANT_INSTRUCTION.to_string()),
        tools: state.dispatcher.registry().declarations(),
        safety_settings: state.safety_settings.clone(),
        generation_config: Some(state.generation_config.clone()),
    };

    let response = state.dispatcher.run(conversation, &options).await?;
    Ok(Json(GenerateResponse { response }))
}
