// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gateway_client::GatewayError;
use serde_json::{json, Value};

use super::{BaseAuditService, BaseScoutAgent, BaseWebScraper, HandoffError, ServerDeps};
use crate::domains::scouting::models::{EventRecord, RawAgentOutput, ScrapeResult};
use crate::domains::scouting::recovery::Recoverer;

// =============================================================================
// Mock Web Scraper
// =============================================================================

/// Returns queued results in order, then an `Empty` result once exhausted.
pub struct MockWebScraper {
    responses: Arc<Mutex<Vec<ScrapeResult>>>,
    fetch_calls: Arc<Mutex<Vec<String>>>,
}

impl MockWebScraper {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, result: ScrapeResult) -> Self {
        self.responses.lock().unwrap().push(result);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_response(ScrapeResult::success(text))
    }

    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

impl Default for MockWebScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWebScraper for MockWebScraper {
    async fn fetch(&self, url: &str) -> ScrapeResult {
        self.fetch_calls.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            ScrapeResult::empty()
        } else {
            responses.remove(0)
        }
    }
}

// =============================================================================
// Mock Scout Agent
// =============================================================================

enum MockAgentReply {
    Output(RawAgentOutput),
    Error(GatewayError),
}

/// Replays canned agent outputs; records every prompt it receives.
pub struct MockScoutAgent {
    replies: Arc<Mutex<Vec<MockAgentReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockScoutAgent {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_output(self, output: RawAgentOutput) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockAgentReply::Output(output));
        self
    }

    /// Shorthand for an agent that answers with `text` only.
    pub fn with_text(self, text: &str) -> Self {
        self.with_output(RawAgentOutput::default().with_text(text))
    }

    pub fn with_error(self, error: GatewayError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockAgentReply::Error(error));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockScoutAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseScoutAgent for MockScoutAgent {
    async fn run(&self, prompt: &str) -> Result<RawAgentOutput, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Ok(RawAgentOutput::default());
        }
        match replies.remove(0) {
            MockAgentReply::Output(output) => Ok(output),
            MockAgentReply::Error(error) => Err(error),
        }
    }
}

// =============================================================================
// Mock Audit Service
// =============================================================================

/// Accepts everything with `{"status": "stored"}` unless told otherwise.
pub struct MockAuditService {
    response: Arc<Mutex<Result<Value, (u16, String)>>>,
    submitted: Arc<Mutex<Vec<EventRecord>>>,
}

impl MockAuditService {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(json!({ "status": "stored" })))),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: Value) -> Self {
        *self.response.lock().unwrap() = Ok(response);
        self
    }

    pub fn with_upstream_error(self, status: u16, body: &str) -> Self {
        *self.response.lock().unwrap() = Err((status, body.to_string()));
        self
    }

    pub fn submitted(&self) -> Vec<EventRecord> {
        self.submitted.lock().unwrap().clone()
    }
}

impl Default for MockAuditService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAuditService for MockAuditService {
    async fn submit(&self, record: &EventRecord) -> Result<Value, HandoffError> {
        self.submitted.lock().unwrap().push(record.clone());
        match &*self.response.lock().unwrap() {
            Ok(value) => Ok(value.clone()),
            Err((status, body)) => Err(HandoffError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock services bundled for injection; keeps handles for assertions.
pub struct TestDependencies {
    pub scraper: Arc<MockWebScraper>,
    pub agent: Arc<MockScoutAgent>,
    pub audit: Arc<MockAuditService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            scraper: Arc::new(MockWebScraper::new()),
            agent: Arc::new(MockScoutAgent::new()),
            audit: Arc::new(MockAuditService::new()),
        }
    }

    pub fn mock_scraper(mut self, scraper: MockWebScraper) -> Self {
        self.scraper = Arc::new(scraper);
        self
    }

    pub fn mock_agent(mut self, agent: MockScoutAgent) -> Self {
        self.agent = Arc::new(agent);
        self
    }

    pub fn mock_audit(mut self, audit: MockAuditService) -> Self {
        self.audit = Arc::new(audit);
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.scraper.clone(),
            self.agent.clone(),
            Arc::new(Recoverer::standard()),
            self.audit.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
