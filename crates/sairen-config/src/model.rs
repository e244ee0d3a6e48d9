// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Sai Ren assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Sai Ren configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SairenConfig {
    /// Assistant identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion service settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Inbound HTTP surface.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Content extraction behavior.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Pages extracted at startup into the reference cache.
    #[serde(default = "default_references")]
    pub references: Vec<ReferenceConfig>,

    /// Product search handler settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Order lookup handler settings.
    #[serde(default)]
    pub orders: OrdersConfig,

    /// Conversation memory policy.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Default for SairenConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            openai: OpenAiConfig::default(),
            gateway: GatewayConfig::default(),
            extract: ExtractConfig::default(),
            references: default_references(),
            search: SearchConfig::default(),
            orders: OrdersConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

/// Assistant identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the chat persona.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Replaces the built-in chat persona instruction when set.
    #[serde(default)]
    pub persona: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            persona: None,
        }
    }
}

fn default_agent_name() -> String {
    "Sai Ren AI".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Completion service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for every completion call.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,

    /// Retries after a transient upstream status.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_openai_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

/// Inbound HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum concurrent `/extract-text` requests; excess callers get 429.
    #[serde(default = "default_extract_concurrency")]
    pub extract_concurrency: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            extract_concurrency: default_extract_concurrency(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_extract_concurrency() -> usize {
    1
}

/// How page markup is retrieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Plain HTTP GET of the raw markup.
    #[default]
    Static,
    /// Headless browser navigation; requires the `browser` feature.
    Browser,
}

/// Which text is taken from the parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Paragraph, heading, and block elements above a length threshold.
    #[default]
    Candidates,
    /// The whole body text.
    Document,
}

/// Content extraction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    #[serde(default)]
    pub renderer: RendererKind,

    #[serde(default)]
    pub selection: SelectionMode,

    /// Cleaned candidate blocks must be longer than this to be kept.
    #[serde(default = "default_min_block_chars")]
    pub min_block_chars: usize,

    /// Fetch or navigation timeout in seconds.
    #[serde(default = "default_extract_timeout")]
    pub timeout_secs: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::default(),
            selection: SelectionMode::default(),
            min_block_chars: default_min_block_chars(),
            timeout_secs: default_extract_timeout(),
        }
    }
}

fn default_min_block_chars() -> usize {
    20
}

fn default_extract_timeout() -> u64 {
    30
}

/// One reference page loaded into the cache at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Logical source name shown to the model ("From {name}: ...").
    pub name: String,
    /// Page URL.
    pub url: String,
}

fn default_references() -> Vec<ReferenceConfig> {
    vec![ReferenceConfig {
        name: "FAQ".to_string(),
        url: "https://sai-ren-ai-frontend.vercel.app/about-us".to_string(),
    }]
}

/// Shape of the natural-language search reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStyle {
    /// Recommend the highest-scoring product.
    #[default]
    Recommendation,
    /// Summarize the first product returned.
    TopResult,
}

/// Product search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Product search endpoint; the term is sent as the `q` parameter.
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub reply_style: ReplyStyle,

    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            reply_style: ReplyStyle::default(),
            timeout_secs: default_search_timeout(),
        }
    }
}

fn default_search_endpoint() -> String {
    "https://dummyjson.com/products/search".to_string()
}

fn default_search_timeout() -> u64 {
    15
}

/// How an order status is synthesized. No real order system is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Always report `fixed_status`.
    #[default]
    Fixed,
    /// Pick uniformly from `statuses`.
    Random,
}

/// Order lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrdersConfig {
    #[serde(default)]
    pub status_policy: StatusPolicy,

    #[serde(default = "default_fixed_status")]
    pub fixed_status: String,

    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            status_policy: StatusPolicy::default(),
            fixed_status: default_fixed_status(),
            statuses: default_statuses(),
        }
    }
}

fn default_fixed_status() -> String {
    "In progress".to_string()
}

fn default_statuses() -> Vec<String> {
    ["Processing", "Shipped", "Delivered", "In progress"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Conversation memory configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Oldest turns are dropped beyond this many per user. `None` keeps all.
    #[serde(default)]
    pub max_turns_per_user: Option<usize>,
}
