//! Completion client against an in-process stub endpoint
//!
//! Covers request shape, bearer auth, and each failure class the client
//! reports: non-2xx status, malformed or empty body, refused connection,
//! timeout.

mod helpers;

use axum::http::StatusCode;
use evplan_ai::llm::{CompletionClient, CompletionError};
use evplan_common::config::LlmSettings;
use helpers::{StubLlm, UNREACHABLE_BASE_URL};
use std::time::Duration;

fn client(base_url: &str, api_key: &str, timeout: Duration) -> CompletionClient {
    CompletionClient::new(&LlmSettings {
        base_url: base_url.to_string(),
        api_key: api_key.to_string(),
        model_name: "meta/llama3.1-8b-instruct".to_string(),
        timeout,
    })
    .expect("client")
}

#[tokio::test]
async fn test_complete_sends_single_user_message_with_bearer() {
    let stub = StubLlm::replying("  Hello there  \n").await;
    let client = client(&stub.base_url, "nvapi-secret", Duration::from_secs(5));

    let content = client.complete("Say hello").await.unwrap();

    assert_eq!(content, "Hello there");
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer nvapi-secret"));
    assert_eq!(requests[0].body["model"], "meta/llama3.1-8b-instruct");
    assert_eq!(requests[0].body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(requests[0].body["messages"][0]["role"], "user");
    assert_eq!(requests[0].prompt(), "Say hello");
}

#[tokio::test]
async fn test_no_api_key_sends_no_authorization() {
    let stub = StubLlm::replying("ok").await;
    let client = client(&stub.base_url, "", Duration::from_secs(5));

    client.complete("ping").await.unwrap();

    assert_eq!(stub.requests()[0].authorization, None);
}

#[tokio::test]
async fn test_base_url_with_v1_suffix_reaches_same_route() {
    let stub = StubLlm::replying("ok").await;
    let client = client(&format!("{}/v1", stub.base_url), "", Duration::from_secs(5));

    assert_eq!(client.complete("ping").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let stub = StubLlm::responding(StatusCode::UNAUTHORIZED, r#"{"detail":"bad key"}"#).await;
    let client = client(&stub.base_url, "wrong", Duration::from_secs(5));

    match client.complete("ping").await {
        Err(CompletionError::Api { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("bad key"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_and_empty_bodies() {
    let stub = StubLlm::responding(StatusCode::OK, "<html>gateway</html>").await;
    let result = client(&stub.base_url, "", Duration::from_secs(5)).complete("ping").await;
    assert!(matches!(result, Err(CompletionError::Parse(_))));

    let stub = StubLlm::responding(StatusCode::OK, r#"{"choices":[]}"#).await;
    let result = client(&stub.base_url, "", Duration::from_secs(5)).complete("ping").await;
    assert!(matches!(result, Err(CompletionError::NoChoices)));

    let stub = StubLlm::replying("").await;
    let result = client(&stub.base_url, "", Duration::from_secs(5)).complete("ping").await;
    assert!(matches!(result, Err(CompletionError::EmptyContent)));
}

#[tokio::test]
async fn test_refused_connection_is_network_error() {
    let client = client(UNREACHABLE_BASE_URL, "", Duration::from_secs(5));

    let result = client.complete("ping").await;

    assert!(matches!(result, Err(CompletionError::Network(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let stub = StubLlm::slow("late", Duration::from_secs(3)).await;
    let client = client(&stub.base_url, "", Duration::from_secs(1));

    let result = client.complete("ping").await;

    assert!(
        matches!(result, Err(CompletionError::Timeout(t)) if t == Duration::from_secs(1)),
        "got {:?}",
        result
    );
}
