use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domains::scouting::recovery::RecoveryError;
use crate::domains::scouting::{parse_target_url, scout_url, ScoutError};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoutRequest {
    pub url: String,
}

/// `POST /scout` - extract, validate and hand off one event page.
///
/// Responds with the audit service's JSON on success.
pub async fn scout_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ScoutRequest>, JsonRejection>,
) -> Result<Json<Value>, ScoutError> {
    let Json(request) = payload.map_err(|e| ScoutError::InvalidRequest(e.body_text()))?;
    let url = parse_target_url(&request.url)?;

    let response = scout_url(url.as_str(), &state.deps).await?;
    Ok(Json(response))
}

impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ScoutError::Recovery(RecoveryError::SchemaValidationFailed { violations }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Schema Validation Failed",
                    "details": violations,
                }),
            ),
            ScoutError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid request",
                    "details": message,
                }),
            ),
            other => {
                tracing::error!(error = %other, "Pipeline error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Processing failed",
                        "details": other.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
