// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: config text in, HTTP responses out.
//!
//! Every outbound dependency (completion API, reference page, product
//! catalogue) is a wiremock server, and the stack is wired the same way the
//! `serve` command wires it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sairen_agent::Agent;
use sairen_config::SairenConfig;
use sairen_context::ReferenceCache;
use sairen_core::traits::ProviderAdapter;
use sairen_extract::ContentExtractor;
use sairen_gateway::{AppState, ExtractionGate, router};
use sairen_memory::ConversationMemory;
use sairen_openai::OpenAiProvider;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAQ_PAGE: &str = "<html><body><nav>Home</nav>\
    <p>Orders ship within two business days from our warehouse.</p>\
    </body></html>";

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-e2e",
        "model": "gpt-4o-mini",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]
    }))
}

async fn mock_completion(server: &MockServer, prompt_marker: &str, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(prompt_marker))
        .respond_with(completion(reply))
        .mount(server)
        .await;
}

fn config_for(upstream: &MockServer) -> SairenConfig {
    let uri = upstream.uri();
    sairen_config::load_and_validate_str(&format!(
        r#"
[openai]
api_key = "sk-e2e"
base_url = "{uri}"
max_retries = 0

[search]
endpoint = "{uri}/products/search"

[[references]]
name = "FAQ"
url = "{uri}/faq"
"#
    ))
    .expect("e2e config should validate")
}

async fn boot(config: &SairenConfig) -> AppState {
    let provider: Arc<dyn ProviderAdapter> =
        Arc::new(OpenAiProvider::new(&config.openai).unwrap());
    let extractor = ContentExtractor::from_config(&config.extract).unwrap();
    let references = ReferenceCache::new();
    let stored = references.populate(&config.references, &extractor).await;
    assert_eq!(stored, 1);

    let memory = ConversationMemory::from_config(&config.memory);
    let agent = Agent::new(provider, memory, references.clone(), config).unwrap();
    AppState::new(
        Arc::new(agent),
        extractor,
        references,
        ExtractionGate::new(config.gateway.extract_concurrency),
    )
}

async fn post(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
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
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn upstream_with_faq() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/faq"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FAQ_PAGE))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn chat_reply_is_grounded_in_reference_page() {
    let upstream = upstream_with_faq().await;
    mock_completion(&upstream, "determine the most appropriate action", "chat").await;
    mock_completion(
        &upstream,
        "From FAQ: Orders ship within two business days from our warehouse.",
        "Orders ship in **two** business days!",
    )
    .await;

    let state = boot(&config_for(&upstream)).await;
    let (status, body) = post(
        &state,
        "/ai-agent",
        json!({"input": "how fast do you ship?", "userId": "u1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reply": "Orders ship in two business days!"}));
}

#[tokio::test]
async fn search_request_reaches_catalogue_with_extracted_term() {
    let upstream = upstream_with_faq().await;
    mock_completion(&upstream, "determine the most appropriate action", "search").await;
    mock_completion(&upstream, "Extract the main search query", "phone").await;
    Mock::given(method("GET"))
        .and(path("/products/search"))
        .and(query_param("q", "phone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {"id": 1, "title": "Basic Phone", "price": 100.0, "rating": 3.0, "stock": 4},
                {"id": 2, "title": "Nova Phone", "price": 250.0, "rating": 4.8, "stock": 9,
                 "description": "Great camera."}
            ]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let state = boot(&config_for(&upstream)).await;
    let (status, body) = post(
        &state,
        "/ai-agent",
        json!({"input": "show me a good phone", "userId": "u2"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["description"], "No description available");
    assert!(
        body["reply"].as_str().unwrap().starts_with("I recommend Nova Phone"),
        "got: {body}"
    );
}

#[tokio::test]
async fn completion_outage_still_answers_over_http() {
    let upstream = upstream_with_faq().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"type": "invalid_request_error", "message": "bad key"}
        })))
        .mount(&upstream)
        .await;

    let state = boot(&config_for(&upstream)).await;
    let (status, body) = post(
        &state,
        "/ai-agent",
        json!({"input": "hello", "userId": "u3"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Failed to generate a response"}));
}

#[tokio::test]
async fn extract_text_route_fetches_live_page() {
    let upstream = upstream_with_faq().await;
    mock_completion(&upstream, "suggest", "Add a returns section.").await;

    let state = boot(&config_for(&upstream)).await;
    let (status, body) = post(
        &state,
        "/extract-text",
        json!({"url": format!("{}/faq", upstream.uri())}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["extractedText"],
        "Orders ship within two business days from our warehouse."
    );
    assert!(body["aiSuggestions"].is_string());
    assert_eq!(state.gate.in_flight(), 0);
}
