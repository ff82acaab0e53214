use serde_json::Value;
use tracing::{error, info, warn};
use url::Url;

use crate::domains::scouting::error::ScoutError;
use crate::domains::scouting::models::EventRecord;
use crate::domains::scouting::prompts::scout_prompt;
use crate::domains::scouting::recovery::RecoveryError;
use crate::kernel::{BaseAuditService, BaseScoutAgent, ServerDeps};

/// Accept only absolute http(s) URLs.
pub fn parse_target_url(raw: &str) -> Result<Url, ScoutError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ScoutError::InvalidRequest(format!("invalid URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScoutError::InvalidRequest(format!(
            "unsupported URL scheme '{}'",
            other
        ))),
    }
}

/// Run the agent for `url` and recover a validated record from its output.
pub async fn extract_event(url: &str, deps: &ServerDeps) -> Result<EventRecord, ScoutError> {
    info!(url, "Scouting");

    let output = deps.agent.run(&scout_prompt(url)).await.map_err(|e| {
        error!(url, error = %e, "Agent run failed");
        ScoutError::from(e)
    })?;

    match deps.recoverer.recover(&output) {
        Ok(record) => {
            info!(url, event_name = %record.event_name(), "Record validated");
            Ok(record)
        }
        Err(err) => {
            match &err {
                RecoveryError::ExtractionFailed { raw } => {
                    let dump = serde_json::to_string_pretty(raw)
                        .unwrap_or_else(|e| format!("<unserializable: {}>", e));
                    error!(url, raw = %dump, "No JSON object found in agent output");
                }
                RecoveryError::SchemaValidationFailed { violations } => {
                    warn!(url, ?violations, "Agent output failed schema validation");
                }
            }
            Err(err.into())
        }
    }
}

/// Full pipeline: extract, validate, hand off, and relay the audit response.
pub async fn scout_url(url: &str, deps: &ServerDeps) -> Result<Value, ScoutError> {
    let record = extract_event(url, deps).await?;

    info!(event_name = %record.event_name(), "Handing off to audit service");
    let response = deps.audit.submit(&record).await?;

    Ok(response)
}
