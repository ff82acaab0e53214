use serde::Serialize;

/// Text the model receives when the page was reachable but had no text.
pub const EMPTY_PAGE_PLACEHOLDER: &str = "Error: Website was reached but no text was found.";

/// Text the model receives when the fetch hit its deadline.
pub const TIMEOUT_PLACEHOLDER: &str = "Error: The website took too long to respond (Timeout).";

/// Why a fetch did not produce usable page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    None,
    HttpError(u16),
    Timeout,
    NetworkError(String),
    Empty,
}

/// Outcome of a single page fetch.
///
/// Produced once per fetch and never retried. Failures are data, not errors:
/// the agent turns them into diagnostic text for the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub text: String,
    pub failure_reason: FailureReason,
}

impl ScrapeResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure_reason: FailureReason::None,
        }
    }

    /// Non-success status; the body is never surfaced as page text.
    pub fn http_error(status: u16) -> Self {
        Self {
            text: String::new(),
            failure_reason: FailureReason::HttpError(status),
        }
    }

    pub fn timeout() -> Self {
        Self {
            text: TIMEOUT_PLACEHOLDER.to_string(),
            failure_reason: FailureReason::Timeout,
        }
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            text: format!("Error: Could not fetch content. {}", message),
            failure_reason: FailureReason::NetworkError(message),
        }
    }

    pub fn empty() -> Self {
        Self {
            text: EMPTY_PAGE_PLACEHOLDER.to_string(),
            failure_reason: FailureReason::Empty,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure_reason == FailureReason::None
    }

    /// Text handed to the model as the tool's `rawText`.
    ///
    /// Successful fetches pass the sanitized page through; failures become a
    /// short diagnostic so the model can report that nothing was found.
    pub fn into_raw_text(self) -> String {
        match self.failure_reason {
            FailureReason::HttpError(status) => {
                format!("Error: Could not fetch content. HTTP error! status: {}", status)
            }
            _ => self.text,
        }
    }
}
