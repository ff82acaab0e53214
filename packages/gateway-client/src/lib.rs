//! Client for OpenAI-compatible chat completion gateways (LiteLLM and friends).
//!
//! The gateway is treated as an opaque text-completion capability: this crate
//! knows the chat-completions wire format and nothing about what the models
//! behind it are asked to do.
//!
//! # Agent with Tools
//!
//! ```rust,ignore
//! use gateway_client::GatewayClient;
//!
//! let client = GatewayClient::new("http://localhost:4000/v1", "sk-1234");
//! let run = client
//!     .agent("berlin-scout-model")
//!     .system("You extract event data")
//!     .tool(MyFetchTool)
//!     .max_steps(5)
//!     .build()
//!     .generate("Scout https://example.org")
//!     .await?;
//! ```

pub mod agent;
pub mod error;
pub mod schema;
pub mod tool;
pub mod types;

pub use agent::{Agent, AgentBuilder};
pub use error::{GatewayError, Result};
pub use schema::ToolParameters;
pub use tool::{ErasedTool, Tool, ToolCall, ToolDefinition, ToolError};
pub use types::*;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Something that can answer a chat-completions request.
///
/// [`GatewayClient`] is the real implementation; tests drive the agent loop
/// with scripted backends.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one `/chat/completions` request body and return the response body.
    async fn send_chat(&self, request: &serde_json::Value) -> Result<serde_json::Value>;
}

/// HTTP client for an OpenAI-compatible gateway.
#[derive(Clone)]
pub struct GatewayClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start building an agent bound to this client.
    pub fn agent(&self, model: impl Into<String>) -> AgentBuilder<'_> {
        AgentBuilder::new(self, model)
    }
}

#[async_trait]
impl ChatBackend for GatewayClient {
    async fn send_chat(&self, request: &serde_json::Value) -> Result<serde_json::Value> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gateway request failed");
                GatewayError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Gateway returned error status");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        debug!(
            model = ?request.get("model"),
            duration_ms = start.elapsed().as_millis(),
            "Gateway chat completion"
        );

        Ok(body)
    }
}
