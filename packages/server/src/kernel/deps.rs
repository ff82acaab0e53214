//! Server dependencies (using traits for testability)
//!
//! The container is built once at startup, never mutated, and shared across
//! requests behind an `Arc`.

use std::sync::Arc;

use anyhow::Result;
use gateway_client::GatewayClient;

use crate::config::Config;
use crate::domains::scouting::recovery::Recoverer;
use crate::kernel::{
    AgentSettings, BaseAuditService, BaseScoutAgent, BaseWebScraper, GatewayScoutAgent,
    HttpAuditClient, HttpPageFetcher,
};

#[derive(Clone)]
pub struct ServerDeps {
    pub scraper: Arc<dyn BaseWebScraper>,
    pub agent: Arc<dyn BaseScoutAgent>,
    pub recoverer: Arc<Recoverer>,
    pub audit: Arc<dyn BaseAuditService>,
}

impl ServerDeps {
    pub fn new(
        scraper: Arc<dyn BaseWebScraper>,
        agent: Arc<dyn BaseScoutAgent>,
        recoverer: Arc<Recoverer>,
        audit: Arc<dyn BaseAuditService>,
    ) -> Self {
        Self {
            scraper,
            agent,
            recoverer,
            audit,
        }
    }

    /// Wire the real HTTP-backed implementations from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let scraper: Arc<dyn BaseWebScraper> = Arc::new(HttpPageFetcher::new(
            config.fetch_timeout,
            config.max_content_chars,
        )?);

        let gateway = GatewayClient::new(&config.gateway_url, &config.gateway_api_key);
        let agent = GatewayScoutAgent::new(
            Arc::new(gateway),
            scraper.clone(),
            AgentSettings {
                model: config.scout_model.clone(),
                max_steps: config.agent_max_steps,
                max_output_tokens: config.agent_max_output_tokens,
            },
        );

        Ok(Self::new(
            scraper,
            Arc::new(agent),
            Arc::new(Recoverer::standard()),
            Arc::new(HttpAuditClient::new(&config.audit_service_url)),
        ))
    }
}
