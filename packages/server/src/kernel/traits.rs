// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Recovery and validation live in the scouting domain and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseWebScraper, BaseScoutAgent)

use async_trait::async_trait;
use gateway_client::GatewayError;
use serde_json::Value;

use super::audit_client::HandoffError;
use crate::domains::scouting::models::{EventRecord, RawAgentOutput, ScrapeResult};

// =============================================================================
// Web Scraper Trait (Infrastructure - page fetch + sanitize)
// =============================================================================

#[async_trait]
pub trait BaseWebScraper: Send + Sync {
    /// Fetch a page and reduce it to plain text.
    ///
    /// Never fails: transport problems are reported through
    /// `ScrapeResult::failure_reason`.
    async fn fetch(&self, url: &str) -> ScrapeResult;
}

// =============================================================================
// Scout Agent Trait (Infrastructure - bounded tool-using LLM session)
// =============================================================================

#[async_trait]
pub trait BaseScoutAgent: Send + Sync {
    /// Run one agent session for `prompt` and return its raw channels untouched.
    async fn run(&self, prompt: &str) -> Result<RawAgentOutput, GatewayError>;
}

// =============================================================================
// Audit Service Trait (Infrastructure - downstream validate-and-store)
// =============================================================================

#[async_trait]
pub trait BaseAuditService: Send + Sync {
    /// Forward a validated record and relay the service's JSON response.
    async fn submit(&self, record: &EventRecord) -> Result<Value, HandoffError>;
}
