//! Exercises `GatewayClient` against an in-process stub gateway.

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use gateway_client::{ChatBackend, GatewayClient, GatewayError, StopReason};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

async fn completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer sk-test");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": format!("model was {}", body["model"].as_str().unwrap_or("?"))
                }
            }]
        })),
    )
}

#[tokio::test]
async fn sends_bearer_key_and_returns_body() {
    let base = spawn(Router::new().route("/v1/chat/completions", post(completion))).await;
    let client = GatewayClient::new(base, "sk-test");

    let body = client
        .send_chat(&json!({ "model": "berlin-scout-model", "messages": [] }))
        .await
        .unwrap();

    assert_eq!(
        body["choices"][0]["message"]["content"],
        "model was berlin-scout-model"
    );
}

#[tokio::test]
async fn agent_runs_against_http_backend() {
    let base = spawn(Router::new().route("/v1/chat/completions", post(completion))).await;
    let client = GatewayClient::new(base, "sk-test");

    let run = client
        .agent("scout")
        .max_steps(3)
        .build()
        .generate("hello")
        .await
        .unwrap();

    assert_eq!(run.stop_reason, StopReason::Completed);
    assert_eq!(run.text.as_deref(), Some("model was scout"));
}

#[tokio::test]
async fn non_success_status_is_api_error_with_body() {
    let base = spawn(Router::new().route("/v1/chat/completions", post(completion))).await;
    let client = GatewayClient::new(base, "wrong-key");

    let err = client.send_chat(&json!({ "model": "m" })).await.unwrap_err();

    match err {
        GatewayError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let base = spawn(Router::new().route(
        "/v1/chat/completions",
        post(|| async { "definitely not json" }),
    ))
    .await;
    let client = GatewayClient::new(base, "sk-test");

    let err = client.send_chat(&json!({ "model": "m" })).await.unwrap_err();
    assert!(matches!(err, GatewayError::Parse(_)));
}

#[tokio::test]
async fn unreachable_gateway_is_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GatewayClient::new(format!("http://{}/v1", addr), "sk-test");
    let err = client.send_chat(&json!({ "model": "m" })).await.unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));
}
