//! Query-restricted endpoint against the fine-tuned model variant.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use corvus_gemini::{Content, GenerationResult};
use corvus_tool::ChatOptions;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

const RESTRICTED_INSTRUCTION: &str =
    "Answer only questions within your tuned domain. If a question falls outside it, reply \
     that the question is out of scope.";

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
}

/// `POST /api/ask` — the query-restricted profile.
///
/// A single-turn call against the configured fine-tuned model variant,
/// with a restrictive system instruction and no tools. Deployments without
/// a tuned model reject the request.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let model = state
        .tuned_model
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("no fine-tuned model is configured".to_string()))?;

    let options = ChatOptions {
        system_instruction: Some(RESTRICTED_INSTRUCTION.to_string()),
        tools: Vec::new(),
        safety_settings: state.safety_settings.clone(),
        generation_config: Some(state.generation_config.clone()),
    };

    match model.generate(vec![Content::user(request.query)], &options).await? {
        GenerationResult::FinalAnswer(text) => Ok(Json(AskResponse { response: text })),
        GenerationResult::ToolCalls(_) => {
            Err(ApiError::Generation(corvus_gemini::Error::EmptyResponse))
        }
    }
}
