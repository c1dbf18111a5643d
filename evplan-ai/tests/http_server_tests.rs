//! HTTP surface tests
//!
//! Drives the router with `tower::ServiceExt::oneshot`; no socket is bound
//! for the server itself.

mod helpers;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use evplan_ai::{build_router, AppState};
use helpers::{seeded_db, test_settings, StubLlm, UNREACHABLE_BASE_URL};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup_app(base_url: &str) -> (TempDir, Router) {
    let (dir, db) = seeded_db().await;
    let settings = test_settings(base_url, db.db_path());
    let state = AppState::from_settings(&settings).expect("app state");
    (dir, build_router(state))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response is JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "evplan-ai");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app.oneshot(get("/build-info")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
}

#[tokio::test]
async fn test_list_functions() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app.oneshot(get("/functions")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["fetch_moderators", "fetch_participants", "generate_event_themes", "refine_event_plan"]
    );
    assert!(body[0]["input_schema"].is_object());
    assert!(body[0]["output_schema"].is_object());
}

#[tokio::test]
async fn test_describe_function_and_unknown() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app.clone().oneshot(get("/functions/refine_event_plan")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "refine_event_plan");

    let response = app.oneshot(get("/functions/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invoke_fetch_participants() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app
        .oneshot(post("/functions/fetch_participants", json!({"limit": 2}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let participants = body["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[1]["name"], "Bob Johnson");
}

#[tokio::test]
async fn test_invoke_with_empty_body_means_no_arguments() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app
        .oneshot(post("/functions/fetch_moderators", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["moderators"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_invoke_unknown_function_is_404_even_with_bad_body() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app
        .oneshot(post("/functions/ask_user", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invoke_bad_input_is_400() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app
        .clone()
        .oneshot(post("/functions/generate_event_themes", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");

    let response = app
        .oneshot(post("/functions/generate_event_themes", json!({"idea": "x"}).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]["message"].as_str().unwrap().contains("event_idea"));
}

#[tokio::test]
async fn test_invoke_generate_event_themes_degrades_not_fails() {
    let (_dir, app) = setup_app(UNREACHABLE_BASE_URL).await;

    let response = app
        .oneshot(post(
            "/functions/generate_event_themes",
            json!({"event_idea": "pickle ball event"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["themes"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_invoke_generate_event_themes_with_stub() {
    let stub =
        StubLlm::replying("**1. Kitchen Cup**\nRound robin.\n**2. Paddle Social**\nEvening mixer.")
            .await;
    let (_dir, app) = setup_app(&stub.base_url).await;

    let response = app
        .oneshot(post(
            "/functions/generate_event_themes",
            json!({"event_idea": "pickle ball event"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"themes": ["Kitchen Cup**\nRound robin.", "Paddle Social**\nEvening mixer."]})
    );
    assert_eq!(stub.requests()[0].authorization.as_deref(), Some("Bearer test-key"));
}
