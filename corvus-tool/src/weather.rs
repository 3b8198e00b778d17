//! Weather lookup tool.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ToolError;
use crate::tool::Tool;

/// The default weather API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Current-weather lookup against a weather HTTP API.
///
/// The API's JSON payload is passed through as the tool result unchanged;
/// the model extracts what it needs.
pub struct WeatherTool {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherTool {
    /// Create a tool talking to the given endpoint.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into(), api_key: api_key.into() }
    }

    /// Create a tool using the default endpoint.
    pub fn with_default_endpoint(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Look up the current weather for a location"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City name, postcode, or latitude,longitude to look up"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let location = args.get("location").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolError::InvalidArguments {
                tool: "get_weather".to_string(),
                message: "missing required 'location' parameter".to_string(),
            }
        })?;

        info!(location, "get_weather tool called");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await
            .map_err(|e| ToolError::Execution {
                tool: "get_weather".to_string(),
                message: format!("request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ToolError::Execution {
                tool: "get_weather".to_string(),
                message: format!("weather API returned {status}: {detail}"),
            });
        }

        response.json().await.map_err(|e| ToolError::Execution {
            tool: "get_weather".to_string(),
            message: format!("failed to parse response: {e}"),
        })
    }
}
