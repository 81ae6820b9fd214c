//! HTTP surface: one JSON endpoint for both wire shapes, plus liveness.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tracing::debug;

use coupler_bus::protocol::error_codes;
use coupler_bus::{AdapterError, ProtocolAdapter};

pub fn router(adapter: Arc<ProtocolAdapter>) -> Router {
    Router::new()
        .route("/mcp", post(mcp_endpoint))
        .route("/health", get(health))
        .with_state(adapter)
}

async fn mcp_endpoint(
    State(adapter): State<Arc<ProtocolAdapter>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return transport_error(error_codes::PARSE_ERROR, format!("Parse error: {rejection}"));
        }
    };

    match adapter.handle(payload).await {
        Ok(body) => Json(body).into_response(),
        Err(AdapterError::MalformedRequest(reason)) => {
            debug!(%reason, "rejected malformed request");
            transport_error(
                error_codes::INVALID_REQUEST,
                format!("Invalid request: {reason}"),
            )
        }
    }
}

/// Pre-envelope failures: the request never became routable, so there is no
/// id to correlate and no envelope to return.
fn transport_error(code: i32, message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": {"code": code, "message": message}})),
    )
        .into_response()
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}
