//! Multipart document upload.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use corvus_rag::Document;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub document_id: String,
}

/// `POST /api/upload` — accept a document in the multipart field `file`,
/// then chunk, embed, and store it.
///
/// The file must be UTF-8 text. A per-chunk embedding failure aborts the
/// whole upload; nothing partial is reported as success.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload: Option<(String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let source_name = field.file_name().unwrap_or("upload.txt").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read file field: {e}")))?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| ApiError::BadRequest("file must be valid UTF-8 text".to_string()))?;
        upload = Some((source_name, text));
    }

    let (source_name, text) = upload
        .ok_or_else(|| ApiError::BadRequest("missing multipart field 'file'".to_string()))?;

    let document = Document::new(text, source_name);
    let document_id = document.id.clone();
    info!(document.id = %document_id, source_name = %document.source_name, "document uploaded");

    state.pipeline.ingest(&document).await?;

    Ok(Json(UploadResponse { document_id }))
}
