//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    BoxError, Json, Router,
};
use serde_json::json;
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{health_handler, scout_handler};

/// Shared application state
///
/// Immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// `request_timeout` bounds a whole request, agent session included. A request
/// that runs out of time gets the same `500 {error, details}` payload as any
/// other pipeline failure.
pub fn build_app(deps: ServerDeps, request_timeout: Duration) -> Router {
    let state = AppState {
        deps: Arc::new(deps),
    };

    // The map frontend is served from a different origin
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/scout", post(scout_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |error: BoxError| async move {
                    handle_middleware_error(error, request_timeout)
                }))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn handle_middleware_error(error: BoxError, request_timeout: Duration) -> Response {
    let details = if error.is::<Elapsed>() {
        format!("request timed out after {:?}", request_timeout)
    } else {
        error.to_string()
    };
    tracing::error!(details = %details, "Request aborted");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Processing failed",
            "details": details,
        })),
    )
        .into_response()
}
