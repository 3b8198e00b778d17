//! Environment-based server configuration.
//!
//! Everything is read once at startup. `GEMINI_API_KEY` (or
//! `GOOGLE_API_KEY`) is the only required variable; the rest have defaults
//! suited to local development with the in-memory store.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use corvus_gemini::HarmBlockThreshold;
use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {message}")]
    InvalidVar {
        var: &'static str,
        message: String,
    },
}

/// Which vector store backend to run against.
#[derive(Debug, Clone)]
pub enum VectorStoreConfig {
    /// Volatile in-process store; nothing survives a restart.
    InMemory,
    /// Managed Pinecone index.
    Pinecone { host: String, api_key: String },
}

/// Weather tool settings. Present only when `WEATHER_API_KEY` is set.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Override for the weather API endpoint.
    pub base_url: Option<String>,
    pub api_key: String,
}

/// Meeting tool settings. Present only when `MEETING_CLIENT_ID` is set.
#[derive(Debug, Clone)]
pub struct MeetingConfig {
    pub token_url: String,
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub account_id: String,
}

/// Server configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub api_key: String,
    /// Generation model for the chat and generate paths.
    pub generation_model: String,
    /// Fine-tuned model variant for the query-restricted path, if any.
    pub tuned_model: Option<String>,
    pub chunk_size: usize,
    pub top_k: usize,
    pub output_dimensionality: usize,
    /// Block threshold applied to every recognized harm category.
    pub safety_threshold: HarmBlockThreshold,
    pub vector_store: VectorStoreConfig,
    pub weather: Option<WeatherConfig>,
    pub meeting: Option<MeetingConfig>,
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidVar { var, message: e.to_string() }),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .map_err(|_| ConfigError::MissingVar("GEMINI_API_KEY"))?;

        let vector_store = match env::var("CORVUS_VECTOR_STORE").as_deref() {
            Ok("pinecone") => VectorStoreConfig::Pinecone {
                host: require("PINECONE_INDEX_HOST")?,
                api_key: require("PINECONE_API_KEY")?,
            },
            Ok("memory") | Err(_) => VectorStoreConfig::InMemory,
            Ok(other) => {
                return Err(ConfigError::InvalidVar {
                    var: "CORVUS_VECTOR_STORE",
                    message: format!("expected 'memory' or 'pinecone', got '{other}'"),
                });
            }
        };

        let safety_threshold = match env::var("CORVUS_SAFETY_THRESHOLD").as_deref() {
            Ok("low") => HarmBlockThreshold::BlockLowAndAbove,
            Ok("medium") | Err(_) => HarmBlockThreshold::BlockMediumAndAbove,
            Ok("high") => HarmBlockThreshold::BlockOnlyHigh,
            Ok("none") => HarmBlockThreshold::BlockNone,
            Ok(other) => {
                return Err(ConfigError::InvalidVar {
                    var: "CORVUS_SAFETY_THRESHOLD",
                    message: format!("expected 'low', 'medium', 'high', or 'none', got '{other}'"),
                });
            }
        };

        let weather = env::var("WEATHER_API_KEY").ok().map(|api_key| WeatherConfig {
            base_url: env::var("WEATHER_API_URL").ok(),
            api_key,
        });

        let meeting = match env::var("MEETING_CLIENT_ID") {
            Ok(client_id) => Some(MeetingConfig {
                token_url: require("MEETING_TOKEN_URL")?,
                api_url: require("MEETING_API_URL")?,
                client_id,
                client_secret: require("MEETING_CLIENT_SECRET")?,
                account_id: require("MEETING_ACCOUNT_ID")?,
            }),
            Err(_) => None,
        };

        Ok(Self {
            port: parse_var("CORVUS_PORT", 8080)?,
            api_key,
            generation_model: env::var("CORVUS_GENERATION_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            tuned_model: env::var("CORVUS_TUNED_MODEL").ok(),
            chunk_size: parse_var("CORVUS_CHUNK_SIZE", 1000)?,
            top_k: parse_var("CORVUS_TOP_K", 5)?,
            output_dimensionality: parse_var("CORVUS_EMBEDDING_DIMENSIONS", 768)?,
            safety_threshold,
            vector_store,
            weather,
            meeting,
        })
    }
}
