//! Error mapping at the HTTP boundary.
//!
//! Internal error kinds are logged with full detail and surfaced to the
//! caller as a generic failure with a human-readable message; provider
//! errors are never leaked verbatim.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself was malformed (missing fields, bad multipart).
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// A required collaborator is not configured on this deployment.
    #[error("{0}")]
    Unavailable(String),

    /// Retrieval-side failure (chunking, embedding, vector store).
    #[error(transparent)]
    Rag(#[from] corvus_rag::RagError),

    /// Generation-side failure (transport, auth, empty response).
    #[error(transparent)]
    Generation(#[from] corvus_gemini::Error),

    /// Tool-dispatch failure.
    #[error(transparent)]
    Dispatch(#[from] corvus_tool::DispatchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Unavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message.clone()),
            other => {
                error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "request failed".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
