//! Natural-language routes: intent preview and full advisor turns.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/intent", post(resolve_intent))
        .route("/advisor", post(advise))
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

fn missing_message() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": "message is required" })),
    )
}

/// POST /api/intent — which rule fires and which call would run, without
/// touching the dataset.
async fn resolve_intent(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessageRequest>,
) -> impl IntoResponse {
    let message = req.message.trim();
    if message.is_empty() {
        return missing_message();
    }
    let resolved = state.advisor.resolver().resolve_with_rule(message);
    let planned = state.advisor.plan(message);
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "rule": resolved.as_ref().map(|(rule, _)| *rule),
            "call": resolved.map(|(_, call)| call),
            "planned": planned,
        })),
    )
}

/// POST /api/advisor — one advisor turn: rendered reply plus the call and
/// its raw result.
async fn advise(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessageRequest>,
) -> impl IntoResponse {
    if req.message.trim().is_empty() {
        return missing_message();
    }
    match state.advisor.respond(&req.message) {
        Ok(reply) => (StatusCode::OK, Json(serde_json::json!(reply))),
        Err(e) => error_response(e),
    }
}
