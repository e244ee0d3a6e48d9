// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Request bodies are validated before any agent work starts. Malformed JSON
//! is treated the same as missing fields. Handled upstream failures still
//! answer 200 with an `{error}` body; only validation (400), admission (429),
//! and unrecoverable faults (500) change the status.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sairen_agent::AgentResponse;
use sairen_core::SairenError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::server::AppState;

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const MISSING_AGENT_FIELDS: &str = "Input and User ID are required";
pub const MISSING_URL: &str = "URL is required";
pub const EXTRACTION_FAILED: &str = "Failed to extract text from the URL";
pub const MISSING_CHAT_FIELDS: &str = "Message and page content are required";
pub const PAGE_CHAT_FAILED: &str = "Failed to generate a response";

/// Request body for POST /ai-agent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Request body for POST /extract-text.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response body for POST /extract-text.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub extracted_text: String,
    pub ai_suggestions: String,
}

/// Request body for POST /chat.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub page_content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Populated reference cache entries.
    pub references: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A [`SairenError`] on its way to becoming an HTTP response.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<SairenError> for ApiError {
    fn from(err: SairenError) -> Self {
        match err {
            SairenError::Validation(message) => Self::new(StatusCode::BAD_REQUEST, message),
            SairenError::Busy => Self::new(StatusCode::TOO_MANY_REQUESTS, SairenError::Busy.to_string()),
            other => {
                warn!(error = %other, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

/// Keeps the value only when present and non-empty. Whitespace counts as a
/// value.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// POST /ai-agent
///
/// Classifies the input and returns the chosen handler's body.
pub async fn post_ai_agent(
    State(state): State<AppState>,
    body: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Json(body) = body.map_err(|e| {
        warn!(error = %e, "rejected /ai-agent body");
        SairenError::Validation(MISSING_AGENT_FIELDS.to_string())
    })?;
    let (Some(input), Some(user_id)) = (required(body.input), required(body.user_id)) else {
        return Err(SairenError::Validation(MISSING_AGENT_FIELDS.to_string()).into());
    };

    Ok(Json(state.agent.respond(&input, &user_id).await))
}

/// POST /extract-text
///
/// Extracts the page at `url` and proposes follow-ups. At most
/// `extract_concurrency` extractions run at once; excess callers get 429.
pub async fn post_extract_text(
    State(state): State<AppState>,
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let url = body
        .ok()
        .and_then(|Json(body)| required(body.url))
        .ok_or_else(|| SairenError::Validation(MISSING_URL.to_string()))?;

    let _permit = state.gate.try_enter().inspect_err(|_| {
        info!(url = %url, "extraction rejected, gate is full");
    })?;

    let extracted_text = state.extractor.try_extract(&url).await.map_err(|e| {
        warn!(url = %url, error = %e, "on-demand extraction failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, EXTRACTION_FAILED)
    })?;
    let ai_suggestions = state.agent.page().suggestions(&extracted_text).await;

    Ok(Json(ExtractResponse {
        extracted_text,
        ai_suggestions,
    }))
}

/// POST /chat
///
/// Answers a message about caller-supplied page content.
pub async fn post_chat(
    State(state): State<AppState>,
    body: Result<Json<PageChatRequest>, JsonRejection>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let (Some(message), Some(page_content)) =
        (required(body.message), required(body.page_content))
    else {
        return Err(SairenError::Validation(MISSING_CHAT_FIELDS.to_string()).into());
    };

    let reply = state
        .agent
        .page()
        .page_chat(&message, &page_content)
        .await
        .map_err(|e| {
            warn!(error = %e, "page chat failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, PAGE_CHAT_FAILED)
        })?;

    Ok(Json(ReplyResponse { reply }))
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started.elapsed().as_secs(),
        references: state.references.len().await,
    })
}
