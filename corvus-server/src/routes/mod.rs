//! Route table and middleware stack.

pub mod ask;
pub mod chat;
pub mod generate;
pub mod health;
pub mod upload;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use corvus_gemini::Content;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Largest accepted request body, multipart uploads included.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Upper bound on one request, covering the two-round generation protocol.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/upload", post(upload::upload))
        .route("/api/chat", post(chat::chat))
        .route("/api/generate", post(generate::generate))
        .route("/api/ask", post(ask::ask))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// One role-tagged turn of caller-supplied conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: HistoryRole,
    pub text: String,
}

/// The author of a history turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Model,
}

impl HistoryTurn {
    /// Convert the wire turn into a generation-request content turn.
    pub fn into_content(self) -> Content {
        match self.role {
            HistoryRole::User => Content::user(self.text),
            HistoryRole::Model => Content::model(self.text),
        }
    }
}
