//! Pipeline ingest/query tests with a deterministic embedder.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use corvus_rag::chunking::FixedSizeChunker;
use corvus_rag::document::Document;
use corvus_rag::embedding::{EmbeddingProvider, EmbeddingTask};
use corvus_rag::error::{RagError, Result};
use corvus_rag::inmemory::InMemoryVectorStore;
use corvus_rag::{RagConfig, RagPipeline};

const DIM: usize = 8;

/// Deterministic embedder: derives a normalized vector from the text bytes
/// and records the task type of every call.
struct RecordingEmbedder {
    tasks: Mutex<Vec<EmbeddingTask>>,
}

impl RecordingEmbedder {
    fn new() -> Self {
        Self { tasks: Mutex::new(Vec::new()) }
    }

    fn recorded_tasks(&self) -> Vec<EmbeddingTask> {
        self.tasks.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for RecordingEmbedder {
    async fn embed(&self, text: &str, task: EmbeddingTask) -> Result<Vec<f32>> {
        self.tasks.lock().unwrap().push(task);

        let mut v = vec![0.0f32; DIM];
        for (i, byte) in text.bytes().enumerate() {
            v[i % DIM] += byte as f32;
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1.0);
        Ok(v.into_iter().map(|x| x / norm).collect())
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Embedder that always fails, for abort-path tests.
struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str, _task: EmbeddingTask) -> Result<Vec<f32>> {
        Err(RagError::EmbeddingError {
            provider: "test".to_string(),
            message: "service unreachable".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

fn pipeline_with(
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<InMemoryVectorStore>,
) -> RagPipeline {
    let config = RagConfig::builder()
        .chunk_size(1000)
        .top_k(3)
        .output_dimensionality(DIM)
        .build()
        .unwrap();

    RagPipeline::builder()
        .config(config)
        .embedding_provider(embedder)
        .vector_store(store)
        .chunker(Arc::new(FixedSizeChunker::new(1000).unwrap()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn upload_2400_characters_yields_three_entries_for_one_document() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let pipeline = pipeline_with(Arc::new(RecordingEmbedder::new()), store.clone());

    let text: String = "the quick brown fox jumps over the lazy dog "
        .chars()
        .cycle()
        .take(2400)
        .collect();
    let document = Document::new(text, "fox.txt");

    let chunks = pipeline.ingest(&document).await.unwrap();

    let sizes: Vec<usize> = chunks.iter().map(|c| c.text.chars().count()).collect();
    assert_eq!(sizes, vec![1000, 1000, 400]);
    assert!(chunks.iter().all(|c| c.document_id == document.id));
    let indexes: Vec<usize> = chunks.iter().map(|c| c.sequence_index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn ingest_embeds_with_document_task_and_query_with_query_task() {
    let embedder = Arc::new(RecordingEmbedder::new());
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let pipeline = pipeline_with(embedder.clone(), store);

    pipeline.ingest(&Document::new("some document text", "a.txt")).await.unwrap();
    pipeline.query("a question").await.unwrap();

    let tasks = embedder.recorded_tasks();
    assert_eq!(tasks, vec![EmbeddingTask::Document, EmbeddingTask::Query]);
}

#[tokio::test]
async fn empty_document_stores_nothing() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let pipeline = pipeline_with(Arc::new(RecordingEmbedder::new()), store.clone());

    let chunks = pipeline.ingest(&Document::new("", "empty.txt")).await.unwrap();
    assert!(chunks.is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn query_on_empty_store_returns_empty_not_error() {
    let pipeline = pipeline_with(
        Arc::new(RecordingEmbedder::new()),
        Arc::new(InMemoryVectorStore::new(DIM)),
    );

    let results = pipeline.query("anything").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn embedding_failure_aborts_the_upload() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let pipeline = pipeline_with(Arc::new(FailingEmbedder), store.clone());

    let err = pipeline.ingest(&Document::new("won't make it", "a.txt")).await.unwrap_err();
    assert!(matches!(err, RagError::PipelineError(_)));
    // Nothing partial was stored.
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn query_respects_top_k() {
    let store = Arc::new(InMemoryVectorStore::new(DIM));
    let pipeline = pipeline_with(Arc::new(RecordingEmbedder::new()), store);

    for i in 0..6 {
        pipeline
            .ingest(&Document::new(format!("document number {i}"), format!("{i}.txt")))
            .await
            .unwrap();
    }

    let results = pipeline.query("document").await.unwrap();
    assert!(results.len() <= 3);
    assert!(!results.is_empty());
}

#[tokio::test]
async fn builder_requires_every_component() {
    let err = RagPipeline::builder().config(RagConfig::default()).build().unwrap_err();
    assert!(matches!(err, RagError::ConfigError(_)));
}
