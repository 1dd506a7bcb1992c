//! Dataset statistics.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

/// GET /api/stats — record count and load diagnostics. Loads the dataset
/// if this is the first access.
async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sections = match state.catalog.sections() {
        Ok(sections) => sections,
        Err(e) => return error_response(e),
    };
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "records": sections.len(),
            "dataset": state.catalog.info(),
            "capabilities": state.advisor.capabilities().iter().map(|c| c.name()).collect::<Vec<_>>(),
            "resultLimit": state.config.result_limit,
            "conversationLog": state.config.conversation_log,
        })),
    )
}
