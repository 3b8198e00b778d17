//! Retrieval tool that exposes the RAG pipeline to the model.
//!
//! Lets a conversational request fall back to the document corpus: the
//! model calls `search_documents` with its own query, and the ranked
//! matches come back as a tool result.

use std::sync::Arc;

use async_trait::async_trait;
use corvus_rag::{EmbeddingTask, RagPipeline};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::ToolError;
use crate::tool::Tool;

/// A retrieval tool backed by a [`RagPipeline`].
pub struct RetrievalTool {
    pipeline: Arc<RagPipeline>,
}

impl RetrievalTool {
    /// Create a new `RetrievalTool` over the given pipeline.
    pub fn new(pipeline: Arc<RagPipeline>) -> Self {
        Self { pipeline }
    }

    /// Query with a custom `top_k`, bypassing the pipeline's configured value.
    async fn query_with_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> corvus_rag::Result<Vec<corvus_rag::SearchResult>> {
        let embedding =
            self.pipeline.embedding_provider().embed(query, EmbeddingTask::Query).await?;
        self.pipeline.vector_store().query(&embedding, top_k, true).await
    }
}

#[async_trait]
impl Tool for RetrievalTool {
    fn name(&self) -> &str {
        "search_documents"
    }

    fn description(&self) -> &str {
        "Search the uploaded document corpus for passages relevant to a query"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to find relevant passages"
                },
                "top_k": {
                    "type": "integer",
                    "description": "Maximum number of passages to return. Uses the pipeline default if omitted."
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let query = args.get("query").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolError::InvalidArguments {
                tool: "search_documents".to_string(),
                message: "missing required 'query' parameter".to_string(),
            }
        })?;

        let top_k_override = args.get("top_k").and_then(|v| v.as_u64()).map(|v| v as usize);

        info!(query, top_k_override, "search_documents tool called");

        let results = match top_k_override {
            Some(top_k) => self.query_with_top_k(query, top_k).await,
            None => self.pipeline.query(query).await,
        };

        let results = results.map_err(|e| {
            error!(error = %e, "search_documents failed");
            ToolError::Execution {
                tool: "search_documents".to_string(),
                message: format!("retrieval failed: {e}"),
            }
        })?;

        serde_json::to_value(&results).map_err(|e| ToolError::Execution {
            tool: "search_documents".to_string(),
            message: format!("failed to serialize results: {e}"),
        })
    }
}
