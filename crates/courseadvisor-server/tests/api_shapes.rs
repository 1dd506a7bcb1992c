//! HTTP surface tests — status mapping and response shapes, driven through
//! the full router without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use courseadvisor_core::{AdvisorConfig, Capability, CapabilitySet, SectionsConfig};
use courseadvisor_runtime::Advisor;
use courseadvisor_server::{routes, AppState};
use courseadvisor_store::{Catalog, Section};
use serde_json::{json, Value};
use tower::ServiceExt;

fn sections() -> Vec<Section> {
    [
        json!({
            "Subject": "ENGLISH", "Crs_Number": "300", "Sec_Number": "A",
            "Section_Name": "ENGLISH 300-A", "Section_Title": "Shakespeare",
            "Desc": "Plays, poems and the ethics of power.",
            "MtgPattern": "MWF 09:30 AM - 10:20 AM"
        }),
        json!({
            "Subject": "ENGLISH", "Crs_Number": "101", "Sec_Number": "B",
            "Section_Name": "ENGLISH 101-B", "Section_Title": "Academic Writing",
            "Desc": "Drafting and revision.",
            "MtgPattern": "TTH 01:30 PM - 02:45 PM"
        }),
    ]
    .into_iter()
    .map(|v| serde_json::from_value(v).unwrap())
    .collect()
}

fn app_with(capabilities: CapabilitySet) -> Router {
    let config = AdvisorConfig::default();
    let advisor = Advisor::new(Arc::new(Catalog::from_sections(sections())), &config)
        .with_capabilities(capabilities);
    routes::build_router(Arc::new(AppState::with_advisor(config, advisor)))
}

fn app() -> Router {
    app_with(CapabilitySet::all())
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_list_tools() {
    let (status, body) = call(app(), "GET", "/api/tools", None).await;
    assert_eq!(status, StatusCode::OK);
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 7);
    assert!(tools.iter().all(|t| t["name"].is_string() && t["description"].is_string()));
    assert!(tools.iter().any(|t| t["name"] == "find_sections_filtered"));
}

#[tokio::test]
async fn test_list_tools_respects_disabled() {
    let app = app_with(CapabilitySet::all().without(Capability::FindSectionsFiltered));
    let (_, body) = call(app, "GET", "/api/tools", None).await;
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 6);
    assert!(!tools.iter().any(|t| t["name"] == "find_sections_filtered"));
}

#[tokio::test]
async fn test_invoke_filtered() {
    let (status, body) = call(
        app(),
        "POST",
        "/api/tools/find_sections_filtered",
        Some(json!({"department": "english", "time_of_day": "morning"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "section_id": "ENGLISH 300-A",
            "section_name": "ENGLISH 300-A",
            "course_title": "Shakespeare",
            "department": "ENGLISH",
            "level": "300",
            "time": "MWF 09:30 AM - 10:20 AM",
            "preview": "Plays, poems and the ethics of power."
        }])
    );
}

#[tokio::test]
async fn test_invoke_without_body_uses_defaults() {
    let (status, body) = call(app(), "POST", "/api/tools/find_sections_filtered", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_details_not_found_is_ok() {
    let (status, body) = call(
        app(),
        "POST",
        "/api/tools/get_section_details",
        Some(json!({"section_id": "XX 999-9"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "not found", "section_id": "XX 999-9"}));
}

#[tokio::test]
async fn test_details_found_returns_raw_record() {
    let (status, body) = call(
        app(),
        "POST",
        "/api/tools/get_section_details",
        Some(json!({"section_id": "ENGLISH 101-B"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Section_Title"], "Academic Writing");
    assert_eq!(body["Crs_Number"], "101");
}

#[tokio::test]
async fn test_unknown_tool_is_404() {
    let (status, body) = call(app(), "POST", "/api/tools/drop_tables", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("drop_tables"));

    let app = app_with(CapabilitySet::all().without(Capability::FindCourses));
    let (status, _) = call(app, "POST", "/api/tools/find_courses", Some(json!({"query": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_args_is_400() {
    let (status, _) = call(app(), "POST", "/api/tools/find_courses", Some(json!({"q": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/api/tools/find_courses")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dataset_failure_is_503() {
    let dir = tempfile::tempdir().unwrap();
    let config = AdvisorConfig {
        sections: SectionsConfig::with_path(dir.path().join("missing.json")),
        ..AdvisorConfig::default()
    };
    let state = Arc::new(AppState::new(config, CapabilitySet::all()));
    let app = routes::build_router(state);

    let (status, body) = call(
        app.clone(),
        "POST",
        "/api/tools/find_courses",
        Some(json!({"query": "ethics"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());

    let (status, _) = call(app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_intent_preview() {
    let (status, body) = call(app(), "POST", "/api/intent", Some(json!({"message": "300 level english"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"], "combined_filter");
    assert_eq!(body["call"]["tool"], "find_sections_filtered");
    assert_eq!(body["call"]["args"]["department"], "ENGLISH");
    assert_eq!(body["call"]["args"]["level"], "300");
    assert_eq!(body["call"]["args"]["limit"], 20);

    let (_, body) = call(app(), "POST", "/api/intent", Some(json!({"message": "hello"}))).await;
    assert_eq!(body, json!({"rule": null, "call": null, "planned": null}));
}

#[tokio::test]
async fn test_intent_preview_shows_fallback() {
    let app = app_with(CapabilitySet::all().without(Capability::FindSectionsFiltered));
    let (_, body) = call(app, "POST", "/api/intent", Some(json!({"message": "300 level english"}))).await;
    assert_eq!(body["call"]["tool"], "find_sections_filtered");
    assert_eq!(
        body["planned"],
        json!({"tool": "find_sections_by_department", "args": {"department": "ENGLISH"}})
    );
}

#[tokio::test]
async fn test_advisor_turn() {
    let (status, body) = call(app(), "POST", "/api/advisor", Some(json!({"message": "morning english"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["text"].as_str().unwrap().starts_with("Found 1 match(es)"));
    assert_eq!(body["call"]["tool"], "find_sections_filtered");
    assert_eq!(body["output"][0]["section_id"], "ENGLISH 300-A");
    assert!(body["latencyMs"].is_number());
}

#[tokio::test]
async fn test_advisor_clarifies() {
    let (status, body) = call(app(), "POST", "/api/advisor", Some(json!({"message": "hello"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["text"].as_str().unwrap().starts_with("Do you want to search by"));
    assert!(body["call"].is_null());
    assert!(body.get("output").is_none());
}

#[tokio::test]
async fn test_advisor_requires_message() {
    let (status, _) = call(app(), "POST", "/api/advisor", Some(json!({"message": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_shape() {
    let (status, body) = call(app(), "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], 2);
    assert!(body["dataset"].is_null());
    assert_eq!(body["capabilities"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["resultLimit"], 20);
}
