//! Plain HTTP page fetcher with regex sanitization.
//!
//! No JavaScript rendering. The whole request, body read included, runs under
//! one `tokio::time::timeout`; when the deadline fires the request future is
//! dropped, which aborts the connection.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};
use url::Url;

use super::BaseWebScraper;
use crate::domains::scouting::models::ScrapeResult;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) BerlinCultureBot/1.0";

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(45);
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 12_000;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]*>?").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip scripts, styles and tags, collapse whitespace, cap at `max_chars` characters.
pub fn sanitize_html(html: &str, max_chars: usize) -> String {
    let text = SCRIPT_BLOCK.replace_all(html, "");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = ANY_TAG.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

enum FetchError {
    Status(u16),
    Transport(reqwest::Error),
}

pub struct HttpPageFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_chars: usize,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration, max_chars: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            timeout,
            max_chars,
        })
    }

    async fn fetch_html(&self, url: Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(FetchError::Transport)
    }
}

#[async_trait]
impl BaseWebScraper for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> ScrapeResult {
        let parsed = match Url::parse(url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => u,
            Ok(u) => {
                return ScrapeResult::network_error(format!(
                    "invalid URL: unsupported scheme '{}'",
                    u.scheme()
                ))
            }
            Err(e) => return ScrapeResult::network_error(format!("invalid URL '{}': {}", url, e)),
        };

        info!(url = %parsed, "Fetching page");

        match tokio::time::timeout(self.timeout, self.fetch_html(parsed)).await {
            Err(_) => {
                warn!(url, timeout_secs = self.timeout.as_secs(), "Fetch timed out");
                ScrapeResult::timeout()
            }
            Ok(Err(FetchError::Status(status))) => {
                warn!(url, status, "Fetch returned error status");
                ScrapeResult::http_error(status)
            }
            Ok(Err(FetchError::Transport(e))) if e.is_timeout() => {
                warn!(url, error = %e, "Fetch timed out in transport");
                ScrapeResult::timeout()
            }
            Ok(Err(FetchError::Transport(e))) => {
                warn!(url, error = %e, "Fetch failed");
                ScrapeResult::network_error(e.to_string())
            }
            Ok(Ok(html)) => {
                let text = sanitize_html(&html, self.max_chars);
                if text.is_empty() {
                    warn!(url, "Page had no text after sanitizing");
                    ScrapeResult::empty()
                } else {
                    debug!(url, chars = text.chars().count(), "Fetched page");
                    ScrapeResult::success(text)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::scouting::models::FailureReason;

    #[test]
    fn test_sanitize_strips_scripts_styles_and_tags() {
        let html = r#"<html><head><STYLE type="text/css">body { color: red; }</STYLE>
            <script>var x = "<p>not text</p>";</script></head>
            <body><h1>Lange   Nacht</h1><p>der Museen</p></body></html>"#;

        assert_eq!(sanitize_html(html, 12_000), "Lange Nacht der Museen");
    }

    #[test]
    fn test_sanitize_multiline_script() {
        let html = "<p>before</p><Script\n  src=\"x.js\">\nline one\nline two\n</sCRIPT><p>after</p>";
        assert_eq!(sanitize_html(html, 100), "before after");
    }

    #[test]
    fn test_sanitize_removes_blocks_without_leaving_a_gap() {
        assert_eq!(sanitize_html("Open<script>x()</script>Air", 100), "OpenAir");
        assert_eq!(sanitize_html("Kunst<style>p{}</style>haus", 100), "Kunsthaus");
    }

    #[test]
    fn test_sanitize_unterminated_tag() {
        assert_eq!(sanitize_html("text <br", 100), "text");
    }

    #[test]
    fn test_sanitize_caps_by_characters() {
        let html = "ö".repeat(50);
        let text = sanitize_html(&html, 10);
        assert_eq!(text.chars().count(), 10);
    }

    #[test]
    fn test_sanitize_empty_page() {
        assert_eq!(sanitize_html("<html><body>  \n </body></html>", 100), "");
    }

    #[tokio::test]
    async fn test_invalid_url_is_network_error() {
        let fetcher = HttpPageFetcher::new(DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONTENT_CHARS).unwrap();

        let result = fetcher.fetch("not a url").await;
        match result.failure_reason {
            FailureReason::NetworkError(message) => assert!(message.contains("invalid URL")),
            other => panic!("expected NetworkError, got {other:?}"),
        }

        let result = fetcher.fetch("ftp://example.org/file").await;
        assert!(matches!(result.failure_reason, FailureReason::NetworkError(_)));
    }
}
