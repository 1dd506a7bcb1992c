//! Capability listing and direct invocation.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use courseadvisor_core::{Capability, Error};
use courseadvisor_resolve::CapabilityCall;

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(invoke_tool))
}

/// GET /api/tools — capabilities on offer.
async fn list_tools(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let tools: Vec<_> = state
        .advisor
        .capabilities()
        .iter()
        .map(|c| {
            serde_json::json!({
                "name": c.name(),
                "description": c.description(),
                "arguments": c.arguments(),
            })
        })
        .collect();
    Json(serde_json::json!({ "tools": tools }))
}

/// POST /api/tools/{name} — run one capability with a flat JSON argument
/// object. An empty body means no arguments.
async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    if let Err(e) = name.parse::<Capability>() {
        return error_response(e);
    }
    let args = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        match serde_json::from_slice(&body) {
            Ok(args) => args,
            Err(e) => return error_response(Error::InvalidArguments(format!("{}: {}", name, e))),
        }
    };

    let result = CapabilityCall::from_parts(&name, args).and_then(|call| state.advisor.invoke(&call));
    match result {
        Ok(output) => (StatusCode::OK, Json(serde_json::json!(output))),
        Err(e) => error_response(e),
    }
}
