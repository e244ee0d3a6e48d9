// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty hosts, well-formed reference URLs, and
//! non-zero pool sizes.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{SairenConfig, StatusPolicy};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SairenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.gateway.host.trim().is_empty() {
        fail("gateway.host must not be empty".to_string());
    }

    if config.gateway.extract_concurrency == 0 {
        fail("gateway.extract_concurrency must be at least 1".to_string());
    }

    if config.openai.model.trim().is_empty() {
        fail("openai.model must not be empty".to_string());
    }

    if !is_http_url(&config.openai.base_url) {
        fail(format!(
            "openai.base_url `{}` must be an http(s) URL",
            config.openai.base_url
        ));
    }

    if !is_http_url(&config.search.endpoint) {
        fail(format!(
            "search.endpoint `{}` must be an http(s) URL",
            config.search.endpoint
        ));
    }

    let mut seen_names = HashSet::new();
    for (i, reference) in config.references.iter().enumerate() {
        if reference.name.trim().is_empty() {
            fail(format!("references[{i}].name must not be empty"));
        } else if !seen_names.insert(reference.name.as_str()) {
            fail(format!(
                "duplicate reference name `{}` in [[references]] array",
                reference.name
            ));
        }
        if !is_http_url(&reference.url) {
            fail(format!(
                "references[{i}].url `{}` must be an http(s) URL",
                reference.url
            ));
        }
    }

    if config.orders.status_policy == StatusPolicy::Random && config.orders.statuses.is_empty()
    {
        fail("orders.statuses must not be empty when status_policy = \"random\"".to_string());
    }

    if config.memory.max_turns_per_user == Some(0) {
        fail("memory.max_turns_per_user must be at least 1 when set".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}
