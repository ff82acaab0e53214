//! Error types for the gateway client.

use thiserror::Error;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors raised while talking to an OpenAI-compatible gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure (connection refused, reset, client-side timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The gateway answered with a non-2xx status
    #[error("Gateway returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The gateway answered 2xx but the payload was not a chat completion
    #[error("Parse error: {0}")]
    Parse(String),
}
