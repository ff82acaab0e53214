//! Client for the downstream validate-and-store audit service.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::BaseAuditService;
use crate::domains::scouting::models::EventRecord;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("Audit service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Audit service unreachable: {0}")]
    Network(String),

    #[error("Audit service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Posts each validated record exactly once; no retries.
pub struct HttpAuditClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAuditClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl BaseAuditService for HttpAuditClient {
    async fn submit(&self, record: &EventRecord) -> Result<Value, HandoffError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| HandoffError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HandoffError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %body, "Audit service rejected record");
            return Err(HandoffError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            status = status.as_u16(),
            event_name = %record.event_name(),
            "Audit service accepted record"
        );

        serde_json::from_str(&body).map_err(|e| HandoffError::InvalidResponse(e.to_string()))
    }
}
