//! Test harness with in-process stub services.
//!
//! Every harness binds its own axum server on `127.0.0.1:0` that plays three
//! roles at once: a small event website, an OpenAI-compatible gateway that
//! calls the `web-scraper` tool once and then answers, and the downstream
//! audit service.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use scout_core::{kernel::ServerDeps, server::build_app, Config};
use serde_json::{json, Value};
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::EVENT_PAGE_HTML;

/// Mutable behaviour and recordings of the stub server.
pub struct StubState {
    /// Text the stub gateway answers with once the tool has been called.
    pub gateway_answer: String,
    pub gateway_requests: Vec<Value>,
    pub audit_status: StatusCode,
    pub audit_body: String,
    pub audit_requests: Vec<Value>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            gateway_answer: String::new(),
            gateway_requests: Vec::new(),
            audit_status: StatusCode::OK,
            audit_body: json!({ "status": "stored", "audited": true }).to_string(),
            audit_requests: Vec::new(),
        }
    }
}

type SharedStub = Arc<Mutex<StubState>>;

/// Test harness that manages stub infrastructure.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let app = ctx.app();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// `http://127.0.0.1:<port>` of the stub server.
    pub base_url: String,
    pub stub: SharedStub,
    server: JoinHandle<()>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.server.abort();
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let stub: SharedStub = Arc::new(Mutex::new(StubState::default()));

        let router = Router::new()
            .route("/site/event", get(|| async { Html(EVENT_PAGE_HTML) }))
            .route(
                "/site/ua",
                get(|headers: HeaderMap| async move {
                    let agent = headers
                        .get("user-agent")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    Html(format!("<p>{}</p>", agent))
                }),
            )
            .route(
                "/site/blank",
                get(|| async { Html("<html><script>render()</script><body> </body></html>") }),
            )
            .route(
                "/site/missing",
                get(|| async { (StatusCode::NOT_FOUND, "no such page") }),
            )
            .route(
                "/site/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<p>boom</p>") }),
            )
            .route(
                "/site/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Html("<p>too late</p>")
                }),
            )
            .route(
                "/site/long",
                get(|| async { Html(format!("<p>{}</p>", "Kiez ".repeat(5_000))) }),
            )
            .route("/v1/chat/completions", post(stub_gateway))
            .route("/audit/validate-and-store", post(stub_audit))
            .with_state(stub.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind stub server")?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            stub,
            server,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Configuration pointing every outbound client at the stub server.
    pub fn config(&self) -> Config {
        let base_url = self.base_url.clone();
        let mut config = Config::from_lookup(|name| match name {
            "LLM_GATEWAY_URL" => Some(format!("{}/v1", base_url)),
            "LLM_GATEWAY_API_KEY" => Some("sk-test".to_string()),
            "AUDIT_SERVICE_URL" => Some(format!("{}/audit/validate-and-store", base_url)),
            _ => None,
        })
        .expect("stub config is valid");
        config.fetch_timeout = Duration::from_millis(500);
        config
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::from_config(&self.config()).expect("Failed to build dependencies")
    }

    /// Router wired to real HTTP clients that talk to the stub server.
    pub fn app(&self) -> Router {
        build_app(self.deps(), Duration::from_secs(30))
    }

    pub fn set_gateway_answer(&self, answer: impl Into<String>) {
        self.stub.lock().unwrap().gateway_answer = answer.into();
    }

    pub fn set_audit_reply(&self, status: StatusCode, body: impl Into<String>) {
        let mut stub = self.stub.lock().unwrap();
        stub.audit_status = status;
        stub.audit_body = body.into();
    }

    pub fn gateway_requests(&self) -> Vec<Value> {
        self.stub.lock().unwrap().gateway_requests.clone()
    }

    pub fn audit_requests(&self) -> Vec<Value> {
        self.stub.lock().unwrap().audit_requests.clone()
    }
}

/// First turn: call `web-scraper` for the URL in the user prompt.
/// After a tool message is present: answer with the configured text.
async fn stub_gateway(State(stub): State<SharedStub>, Json(request): Json<Value>) -> Json<Value> {
    let mut stub = stub.lock().unwrap();
    stub.gateway_requests.push(request.clone());

    let messages = request["messages"].as_array().cloned().unwrap_or_default();
    let tool_called = messages.iter().any(|m| m["role"] == "tool");

    if tool_called {
        return Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": stub.gateway_answer } }],
            "usage": { "prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120 }
        }));
    }

    let prompt = messages
        .iter()
        .find(|m| m["role"] == "user")
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default();
    let url = prompt
        .split_whitespace()
        .find(|token| token.starts_with("http"))
        .map(|token| token.trim_end_matches('.'))
        .unwrap_or_default();

    Json(json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_fetch",
                    "type": "function",
                    "function": {
                        "name": "web-scraper",
                        "arguments": json!({ "url": url }).to_string()
                    }
                }]
            }
        }],
        "usage": { "prompt_tokens": 50, "completion_tokens": 10, "total_tokens": 60 }
    }))
}

async fn stub_audit(State(stub): State<SharedStub>, Json(record): Json<Value>) -> Response {
    let mut stub = stub.lock().unwrap();
    stub.audit_requests.push(record);

    (
        stub.audit_status,
        [("content-type", "application/json")],
        stub.audit_body.clone(),
    )
        .into_response()
}
