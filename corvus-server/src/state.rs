//! Shared application state and startup wiring.

use std::sync::Arc;

use corvus_gemini::{Gemini, GenerationConfig, Model, SafetySetting};
use corvus_rag::{
    FixedSizeChunker, GeminiEmbeddingProvider, InMemoryVectorStore, PineconeVectorStore,
    RagConfig, RagPipeline, VectorStore,
};
use corvus_tool::{
    ChatModel, Dispatcher, GeminiChatModel, MeetingTool, RetrievalTool, ToolRegistry, WeatherTool,
};
use tracing::info;

use crate::config::{ServerConfig, VectorStoreConfig};

/// State shared by every handler.
///
/// Collaborators live behind trait objects so tests can assemble an
/// isolated state from a mock embedder, a scripted chat model, and a
/// fresh in-memory store.
pub struct AppState {
    /// Retrieval pipeline shared by uploads, chat, and the retrieval tool.
    pub pipeline: Arc<RagPipeline>,
    /// Generation backend for the RAG-prompt profile.
    pub rag_model: Arc<dyn ChatModel>,
    /// Generation backend for the query-restricted profile, if configured.
    pub tuned_model: Option<Arc<dyn ChatModel>>,
    /// Single-round function-call dispatcher for the conversational profile.
    pub dispatcher: Arc<Dispatcher>,
    /// Safety settings forwarded unmodified on every generation call.
    pub safety_settings: Vec<SafetySetting>,
    /// Sampling parameters shared by all profiles.
    pub generation_config: GenerationConfig,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    pub fn new(
        pipeline: Arc<RagPipeline>,
        rag_model: Arc<dyn ChatModel>,
        tuned_model: Option<Arc<dyn ChatModel>>,
        dispatcher: Arc<Dispatcher>,
        safety_settings: Vec<SafetySetting>,
        generation_config: GenerationConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            pipeline,
            rag_model,
            tuned_model,
            dispatcher,
            safety_settings,
            generation_config,
        })
    }

    /// Wire the production state from configuration.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Arc<Self>> {
        let rag_config = RagConfig::builder()
            .chunk_size(config.chunk_size)
            .top_k(config.top_k)
            .output_dimensionality(config.output_dimensionality)
            .build()?;

        let embedder = Arc::new(
            GeminiEmbeddingProvider::new(&config.api_key)?
                .with_output_dimensionality(config.output_dimensionality as i32),
        );

        let vector_store: Arc<dyn VectorStore> = match &config.vector_store {
            VectorStoreConfig::InMemory => {
                info!("using in-memory vector store (volatile)");
                Arc::new(InMemoryVectorStore::new(config.output_dimensionality))
            }
            VectorStoreConfig::Pinecone { host, api_key } => {
                info!(host = %host, "using Pinecone vector store");
                Arc::new(PineconeVectorStore::new(host, api_key)?)
            }
        };

        let pipeline = Arc::new(
            RagPipeline::builder()
                .config(rag_config)
                .embedding_provider(embedder)
                .vector_store(vector_store)
                .chunker(Arc::new(FixedSizeChunker::new(config.chunk_size)?))
                .build()?,
        );

        let generation =
            Gemini::with_model(&config.api_key, qualify_model(&config.generation_model))?;
        let rag_model: Arc<dyn ChatModel> = Arc::new(GeminiChatModel::new(generation));

        let tuned_model: Option<Arc<dyn ChatModel>> = match &config.tuned_model {
            Some(name) => {
                let client = Gemini::with_model(&config.api_key, qualify_model(name))?;
                Some(Arc::new(GeminiChatModel::new(client)))
            }
            None => None,
        };

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(RetrievalTool::new(pipeline.clone())));
        if let Some(weather) = &config.weather {
            let tool = match &weather.base_url {
                Some(base_url) => WeatherTool::new(base_url, &weather.api_key),
                None => WeatherTool::with_default_endpoint(&weather.api_key),
            };
            registry.register(Arc::new(tool));
        }
        if let Some(meeting) = &config.meeting {
            registry.register(Arc::new(MeetingTool::new(corvus_tool::MeetingConfig {
                token_url: meeting.token_url.clone(),
                api_url: meeting.api_url.clone(),
                client_id: meeting.client_id.clone(),
                client_secret: meeting.client_secret.clone(),
                account_id: meeting.account_id.clone(),
            })));
        }
        info!(tool_count = registry.len(), "tool registry assembled");

        let dispatcher = Arc::new(Dispatcher::new(rag_model.clone(), registry));

        Ok(Self::new(
            pipeline,
            rag_model,
            tuned_model,
            dispatcher,
            SafetySetting::all_categories(config.safety_threshold),
            GenerationConfig {
                temperature: Some(0.7),
                max_output_tokens: Some(2048),
                ..Default::default()
            },
        ))
    }
}

/// Qualify a bare model name into the API's resource-path form.
fn qualify_model(name: &str) -> Model {
    if name.starts_with("models/") || name.starts_with("tunedModels/") {
        Model::Custom(name.to_string())
    } else {
        Model::Custom(format!("models/{name}"))
    }
}
