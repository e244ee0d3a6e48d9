// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process route tests over the full router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use sairen_agent::Agent;
use sairen_config::model::{SairenConfig, SelectionMode};
use sairen_context::ReferenceCache;
use sairen_extract::ContentExtractor;
use sairen_gateway::{AppState, ExtractionGate, router};
use sairen_memory::ConversationMemory;
use sairen_test_utils::{MockFetcher, MockProvider};
use serde_json::{Value, json};
use tower::ServiceExt;

const PAGE_URL: &str = "https://shop.test/about";

struct Harness {
    state: AppState,
    provider: Arc<MockProvider>,
    memory: ConversationMemory,
}

fn harness(provider: MockProvider) -> Harness {
    let provider = Arc::new(provider);
    let memory = ConversationMemory::new();
    let references = ReferenceCache::new();
    let agent = Agent::new(
        provider.clone(),
        memory.clone(),
        references.clone(),
        &SairenConfig::default(),
    )
    .unwrap();
    let fetcher = MockFetcher::new()
        .with_page(
            PAGE_URL,
            "<p>Sai Ren sells refurbished phones with a one year warranty.</p>",
        )
        .with_failure("https://shop.test/down", "connection refused");
    let extractor = ContentExtractor::new(Arc::new(fetcher), SelectionMode::Candidates, 20);

    Harness {
        state: AppState::new(Arc::new(agent), extractor, references, ExtractionGate::new(1)),
        provider,
        memory,
    }
}

async fn post(state: &AppState, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    split(response).await
}

async fn split(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn ai_agent_rejects_missing_fields_without_calling_the_model() {
    let h = harness(MockProvider::new());
    for body in [
        r#"{}"#,
        r#"{"input": "hi"}"#,
        r#"{"userId": "u1"}"#,
        r#"{"input": "", "userId": "u1"}"#,
        r#"{"input": "hi", "userId": ""}"#,
        r#"not json"#,
    ] {
        let (status, json) = post(&h.state, "/ai-agent", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json, json!({"error": "Input and User ID are required"}));
    }
    assert_eq!(h.provider.call_count().await, 0);
}

#[tokio::test]
async fn ai_agent_accepts_whitespace_values() {
    let h = harness(MockProvider::with_responses(["chat", "Hello there"]));
    let (status, json) = post(&h.state, "/ai-agent", r#"{"input": " ", "userId": " "}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"reply": "Hello there"}));
    assert_eq!(h.memory.history(" ").await.len(), 2);
}

#[tokio::test]
async fn ai_agent_chat_round_trip() {
    let h = harness(MockProvider::with_responses(["chat", "Hi, how can I help?"]));
    let (status, json) = post(&h.state, "/ai-agent", r#"{"input": "hello", "userId": "u1"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"reply": "Hi, how can I help?"}));
    assert_eq!(h.memory.history("u1").await.len(), 2);
}

#[tokio::test]
async fn ai_agent_handled_failure_is_still_200() {
    let h = harness(MockProvider::with_responses(["extract-text"]));
    let (status, json) = post(&h.state, "/ai-agent", r#"{"input": "x", "userId": "u"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": "Text extraction is handled in the backend."}));
}

#[tokio::test]
async fn extract_text_returns_text_and_suggestions() {
    let h = harness(MockProvider::with_responses(["Do phones ship free?"]));
    let (status, json) = post(
        &h.state,
        "/extract-text",
        &json!({"url": PAGE_URL}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "extractedText": "Sai Ren sells refurbished phones with a one year warranty.",
            "aiSuggestions": "Do phones ship free?"
        })
    );
    assert_eq!(h.state.gate.in_flight(), 0);
}

#[tokio::test]
async fn extract_text_is_rejected_while_gate_is_held() {
    let h = harness(MockProvider::new());
    let held = h.state.gate.try_enter().unwrap();

    let (status, json) = post(
        &h.state,
        "/extract-text",
        &json!({"url": PAGE_URL}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json, json!({"error": "server is busy, please try again later"}));

    drop(held);
    let (status, _) = post(
        &h.state,
        "/extract-text",
        &json!({"url": PAGE_URL}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn extract_text_failure_is_500_and_releases_gate() {
    let h = harness(MockProvider::new());
    let (status, json) = post(
        &h.state,
        "/extract-text",
        r#"{"url": "https://shop.test/down"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Failed to extract text from the URL"}));
    assert_eq!(h.state.gate.in_flight(), 0);
}

#[tokio::test]
async fn extract_text_requires_url() {
    let h = harness(MockProvider::new());
    let (status, json) = post(&h.state, "/extract-text", r#"{}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "URL is required"}));
}

#[tokio::test]
async fn extract_text_suggestion_failure_uses_fallback() {
    let h = harness(MockProvider::failing());
    let (status, json) = post(
        &h.state,
        "/extract-text",
        &json!({"url": PAGE_URL}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["aiSuggestions"], "Error generating content");
}

#[tokio::test]
async fn page_chat_answers_and_validates() {
    let h = harness(MockProvider::with_responses(["One year."]));
    let (status, json) = post(
        &h.state,
        "/chat",
        r#"{"message": "warranty?", "pageContent": "One year warranty."}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"reply": "One year."}));

    let (status, json) = post(&h.state, "/chat", r#"{"message": "warranty?"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Message and page content are required"}));
}

#[tokio::test]
async fn page_chat_provider_failure_is_500() {
    let h = harness(MockProvider::failing());
    let (status, json) = post(
        &h.state,
        "/chat",
        r#"{"message": "q", "pageContent": "c"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({"error": "Failed to generate a response"}));
}

#[tokio::test]
async fn health_reports_reference_count() {
    let h = harness(MockProvider::new());
    h.state.references.insert("FAQ", "text").await;

    let response = router(h.state.clone())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let (status, json) = split(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["references"], 1);
    assert!(json["uptime_secs"].is_u64());
}
