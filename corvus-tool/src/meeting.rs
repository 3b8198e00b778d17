//! Meeting scheduling tool.
//!
//! Creating a meeting takes two hops: a client-credentials token exchange
//! (POST with Basic auth) and the meeting-creation call itself (POST with
//! the Bearer token). Tokens are cached until shortly before expiry. A
//! failed token exchange surfaces as a failed tool invocation, never as an
//! uncaught error.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::ToolError;
use crate::tool::Tool;

/// Connection settings for the meeting-scheduling API.
#[derive(Debug, Clone)]
pub struct MeetingConfig {
    /// OAuth token endpoint.
    pub token_url: String,
    /// Meeting-creation endpoint.
    pub api_url: String,
    /// OAuth client id (Basic auth username).
    pub client_id: String,
    /// OAuth client secret (Basic auth password).
    pub client_secret: String,
    /// Account the credentials are scoped to.
    pub account_id: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Meeting creation behind a client-credentials token exchange.
pub struct MeetingTool {
    client: reqwest::Client,
    config: MeetingConfig,
    cached: Mutex<Option<CachedToken>>,
}

impl MeetingTool {
    /// Create a tool from connection settings.
    pub fn new(config: MeetingConfig) -> Self {
        Self { client: reqwest::Client::new(), config, cached: Mutex::new(None) }
    }

    /// Fetch (or reuse) an access token for the meeting API.
    ///
    /// Tokens are cached and refreshed 60 seconds before expiry.
    async fn access_token(&self) -> Result<String, ToolError> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        {
            let cache = self.cached.lock().await;
            if let Some(token) = cache.as_ref() {
                if token.expires_at.saturating_sub(60) > now {
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!(token_url = %self.config.token_url, "requesting meeting API access token");

        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.config.account_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ToolError::Auth { message: format!("token request failed: {e}") })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ToolError::Auth {
                message: format!("token endpoint returned {status}: {detail}"),
            });
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: i64,
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ToolError::Auth { message: format!("malformed token response: {e}") })?;

        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: now + token.expires_in,
        };
        *self.cached.lock().await = Some(cached);

        Ok(token.access_token)
    }
}

#[async_trait]
impl Tool for MeetingTool {
    fn name(&self) -> &str {
        "schedule_meeting"
    }

    fn description(&self) -> &str {
        "Create a meeting and return its join details"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Title of the meeting"
                },
                "start_time": {
                    "type": "string",
                    "description": "Start time in ISO-8601 format, e.g. 2026-08-07T15:00:00Z"
                },
                "duration_minutes": {
                    "type": "integer",
                    "description": "Meeting length in minutes"
                },
                "agenda": {
                    "type": "string",
                    "description": "Optional agenda text"
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let topic = args.get("topic").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolError::InvalidArguments {
                tool: "schedule_meeting".to_string(),
                message: "missing required 'topic' parameter".to_string(),
            }
        })?;

        info!(topic, "schedule_meeting tool called");

        let token = self.access_token().await?;

        let mut body = Map::new();
        body.insert("topic".to_string(), Value::String(topic.to_string()));
        if let Some(start_time) = args.get("start_time").and_then(|v| v.as_str()) {
            body.insert("start_time".to_string(), Value::String(start_time.to_string()));
        }
        if let Some(duration) = args.get("duration_minutes").and_then(|v| v.as_i64()) {
            body.insert("duration".to_string(), Value::from(duration));
        }
        if let Some(agenda) = args.get("agenda").and_then(|v| v.as_str()) {
            body.insert("agenda".to_string(), Value::String(agenda.to_string()));
        }

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(token)
            .json(&Value::Object(body))
            .send()
            .await
            .map_err(|e| ToolError::Execution {
                tool: "schedule_meeting".to_string(),
                message: format!("request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ToolError::Execution {
                tool: "schedule_meeting".to_string(),
                message: format!("meeting API returned {status}: {detail}"),
            });
        }

        response.json().await.map_err(|e| ToolError::Execution {
            tool: "schedule_meeting".to_string(),
            message: format!("failed to parse response: {e}"),
        })
    }
}
