//! HTTP route handlers.

pub mod advisor;
pub mod stats;
pub mod tools;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use courseadvisor_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(tools::routes())
        .merge(advisor::routes())
        .merge(stats::routes())
}

/// Status code for an error crossing the HTTP boundary.
pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::UnknownCapability(_) => StatusCode::NOT_FOUND,
        Error::InvalidArguments(_) => StatusCode::BAD_REQUEST,
        e if e.is_dataset_failure() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"error": ...}` body with the mapped status.
pub fn error_response(error: Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = status_for(&error);
    if status.is_server_error() {
        warn!("Request failed: {}", error);
    }
    (status, Json(serde_json::json!({ "error": error.to_string() })))
}
