//! Kernel module - server infrastructure and dependencies.

pub mod ai_tools;
pub mod audit_client;
pub mod deps;
pub mod page_fetcher;
pub mod scout_agent;
pub mod test_dependencies;
pub mod traits;

pub use ai_tools::{WebScraperTool, WEB_SCRAPER_TOOL_NAME};
pub use audit_client::{HandoffError, HttpAuditClient};
pub use deps::ServerDeps;
pub use page_fetcher::{sanitize_html, HttpPageFetcher, USER_AGENT};
pub use scout_agent::{AgentSettings, GatewayScoutAgent};
pub use test_dependencies::TestDependencies;
pub use traits::*;
