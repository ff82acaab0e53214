//! Tools the scout agent may call.
//!
//! These implement the `gateway_client::Tool` trait and are handed to the
//! agent builder for the tool-calling loop.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use gateway_client::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::kernel::traits::BaseWebScraper;

pub const WEB_SCRAPER_TOOL_NAME: &str = "web-scraper";

// =============================================================================
// Web Scraper Tool
// =============================================================================

/// Arguments for the web scraper.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WebScraperArgs {
    /// The full http(s) URL of the page to read.
    pub url: String,
}

/// Sanitized page text, or a diagnostic when the fetch failed.
#[derive(Debug, Serialize)]
pub struct WebScraperOutput {
    #[serde(rename = "rawText")]
    pub raw_text: String,
}

/// Fetches a page and returns its plain text to the model.
///
/// Fetch failures never surface as tool errors; the model gets a readable
/// explanation in `rawText` instead.
pub struct WebScraperTool {
    scraper: Arc<dyn BaseWebScraper>,
}

impl WebScraperTool {
    pub fn new(scraper: Arc<dyn BaseWebScraper>) -> Self {
        Self { scraper }
    }
}

#[async_trait]
impl Tool for WebScraperTool {
    const NAME: &'static str = WEB_SCRAPER_TOOL_NAME;
    type Args = WebScraperArgs;
    type Output = WebScraperOutput;
    type Error = Infallible;

    fn description(&self) -> &str {
        "Fetch a web page and return its visible text with markup removed."
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let result = self.scraper.fetch(&args.url).await;
        debug!(
            url = %args.url,
            failure = ?result.failure_reason,
            "web-scraper tool call"
        );

        Ok(WebScraperOutput {
            raw_text: result.into_raw_text(),
        })
    }
}
