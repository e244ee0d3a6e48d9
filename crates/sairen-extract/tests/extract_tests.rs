// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end extraction against a local HTTP server.

use sairen_config::model::{ExtractConfig, SelectionMode};
use sairen_extract::ContentExtractor;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAQ_PAGE: &str = r#"<!doctype html>
<html>
<head><title>FAQ</title></head>
<body>
  <header><a href="/">Home</a><button>Menu</button></header>
  <section>
    <h2>How long does shipping take?</h2>
    <p>Orders leave our warehouse within two business days&nbsp;of payment.</p>
    <ul>
      <li>Free returns on every order for thirty days.</li>
      <li>FAQ</li>
    </ul>
  </section>
</body>
</html>"#;

async fn serve(page: &'static str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/faq"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(page),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn candidate_selection_over_http() {
    let server = serve(FAQ_PAGE).await;
    let extractor = ContentExtractor::from_config(&ExtractConfig::default()).unwrap();

    let text = extractor
        .try_extract(&format!("{}/faq", server.uri()))
        .await
        .unwrap();

    assert_eq!(
        text,
        "How long does shipping take? \
         Orders leave our warehouse within two business days of payment. \
         Free returns on every order for thirty days."
    );
}

#[tokio::test]
async fn document_selection_keeps_short_fragments() {
    let server = serve(FAQ_PAGE).await;
    let config = ExtractConfig {
        selection: SelectionMode::Document,
        ..ExtractConfig::default()
    };
    let extractor = ContentExtractor::from_config(&config).unwrap();

    let text = extractor
        .extract(&format!("{}/faq", server.uri()))
        .await
        .unwrap();

    assert!(text.starts_with("Home Menu How long"), "got: {text}");
    assert!(text.ends_with("FAQ"), "got: {text}");
    assert!(!text.contains("  "));
}

#[tokio::test]
async fn server_error_yields_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let extractor = ContentExtractor::from_config(&ExtractConfig::default()).unwrap();
    assert!(extractor.extract(&server.uri()).await.is_none());
}
