//! The scout agent: one bounded tool-calling session per request.

use std::sync::Arc;

use async_trait::async_trait;
use gateway_client::{AgentBuilder, ChatBackend, GatewayError, StopReason};
use tracing::{info, warn};

use super::ai_tools::WebScraperTool;
use super::{BaseScoutAgent, BaseWebScraper};
use crate::domains::scouting::models::RawAgentOutput;
use crate::domains::scouting::prompts::SCOUT_INSTRUCTIONS;

/// Extraction is deterministic; not configurable.
pub const SCOUT_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub model: String,
    pub max_steps: usize,
    pub max_output_tokens: u32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "berlin-scout-model".to_string(),
            max_steps: 5,
            max_output_tokens: 1500,
        }
    }
}

/// Drives the gateway with the `web-scraper` tool attached.
pub struct GatewayScoutAgent {
    backend: Arc<dyn ChatBackend>,
    scraper: Arc<dyn BaseWebScraper>,
    settings: AgentSettings,
}

impl GatewayScoutAgent {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        scraper: Arc<dyn BaseWebScraper>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            backend,
            scraper,
            settings,
        }
    }
}

#[async_trait]
impl BaseScoutAgent for GatewayScoutAgent {
    async fn run(&self, prompt: &str) -> Result<RawAgentOutput, GatewayError> {
        let run = AgentBuilder::new(self.backend.as_ref(), self.settings.model.as_str())
            .system(SCOUT_INSTRUCTIONS)
            .tool(WebScraperTool::new(self.scraper.clone()))
            .max_steps(self.settings.max_steps)
            .temperature(SCOUT_TEMPERATURE)
            .max_tokens(self.settings.max_output_tokens)
            .build()
            .generate(prompt)
            .await?;

        if run.stop_reason == StopReason::StepLimit {
            warn!(
                steps = run.steps,
                tool_calls = run.tool_results.len(),
                "Scout agent stopped at step limit"
            );
        }
        info!(
            steps = run.steps,
            tool_calls = run.tool_results.len(),
            has_text = run.text.is_some(),
            total_tokens = run.usage.total_tokens,
            "Scout agent finished"
        );

        Ok(RawAgentOutput::from(run))
    }
}
