//! Pinecone vector store backend.
//!
//! Provides [`PineconeVectorStore`] which implements [`VectorStore`]
//! against a Pinecone serverless index over its REST API. This module is
//! only available when the `pinecone` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// Upsert batches are capped to respect the index's payload-size limits.
const UPSERT_BATCH_SIZE: usize = 100;

/// A [`VectorStore`] backed by a [Pinecone](https://www.pinecone.io/) index.
///
/// Chunk text and provenance travel as vector metadata so that query
/// results can be rendered without a second lookup. Upserts are split into
/// batches of 100 vectors submitted sequentially; a failing batch aborts
/// the remaining batches and the error names the failed entry range, so a
/// partially applied upsert is never reported as success. Re-upserting an
/// id relies on the index's own replacement semantics (Pinecone overwrites
/// the stored vector for an existing id).
pub struct PineconeVectorStore {
    client: reqwest::Client,
    host: String,
    api_key: String,
}

impl PineconeVectorStore {
    /// Create a new store talking to the given index host
    /// (e.g. `https://my-index-abc123.svc.us-east-1-aws.pinecone.io`).
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::VectorStoreError {
                backend: "pinecone".to_string(),
                message: "API key must not be empty".to_string(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            host: host.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn map_err(e: reqwest::Error) -> RagError {
        RagError::VectorStoreError { backend: "pinecone".to_string(), message: e.to_string() }
    }

    async fn post_json<Req: Serialize, Res: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Res> {
        let url = format!("{}{path}", self.host);
        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(backend = "pinecone", error = %e, "request failed");
                Self::map_err(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(backend = "pinecone", %status, "index returned an error");
            return Err(RagError::VectorStoreError {
                backend: "pinecone".to_string(),
                message: format!("index returned {status}: {detail}"),
            });
        }

        response.json().await.map_err(|e| {
            error!(backend = "pinecone", error = %e, "failed to parse response");
            Self::map_err(e)
        })
    }
}

// ── Pinecone API request/response types ────────────────────────────

#[derive(Serialize, Deserialize)]
struct VectorMetadata {
    text: String,
    document_id: String,
    source_name: String,
}

#[derive(Serialize)]
struct UpsertVector {
    id: String,
    values: Vec<f32>,
    metadata: VectorMetadata,
}

#[derive(Serialize)]
struct UpsertRequest {
    vectors: Vec<UpsertVector>,
}

#[derive(Deserialize)]
struct UpsertResponse {
    #[serde(rename = "upsertedCount", default)]
    upserted_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryMatch {
    score: f32,
    #[serde(default)]
    metadata: Option<VectorMetadata>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

// ── VectorStore implementation ─────────────────────────────────────

#[async_trait]
impl VectorStore for PineconeVectorStore {
    async fn upsert(&self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        for (batch_index, batch) in chunks.chunks(UPSERT_BATCH_SIZE).enumerate() {
            let start = batch_index * UPSERT_BATCH_SIZE;
            let end = start + batch.len();

            let vectors = batch
                .iter()
                .map(|chunk| UpsertVector {
                    id: chunk.id.clone(),
                    values: chunk.embedding.clone(),
                    metadata: VectorMetadata {
                        text: chunk.text.clone(),
                        document_id: chunk.document_id.clone(),
                        source_name: chunk.source_name.clone(),
                    },
                })
                .collect();

            let response: UpsertResponse =
                match self.post_json("/vectors/upsert", &UpsertRequest { vectors }).await {
                    Ok(response) => response,
                    Err(RagError::VectorStoreError { backend, message }) => {
                        return Err(RagError::VectorStoreError {
                            backend,
                            message: format!("upsert of entries {start}..{end} failed: {message}"),
                        });
                    }
                    Err(e) => return Err(e),
                };

            debug!(
                backend = "pinecone",
                batch_index,
                upserted = response.upserted_count,
                "upserted batch"
            );
        }

        Ok(())
    }

    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<SearchResult>> {
        let request = QueryRequest { vector: embedding, top_k, include_metadata };
        let response: QueryResponse = self.post_json("/query", &request).await?;

        let results = response
            .matches
            .into_iter()
            .map(|m| match m.metadata {
                Some(metadata) => SearchResult {
                    text: metadata.text,
                    score: m.score,
                    document_id: Some(metadata.document_id),
                    source_name: Some(metadata.source_name),
                },
                None => SearchResult {
                    text: String::new(),
                    score: m.score,
                    document_id: None,
                    source_name: None,
                },
            })
            .collect();

        Ok(results)
    }
}
