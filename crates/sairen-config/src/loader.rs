// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sairen.toml` > `~/.config/sairen/sairen.toml` > `/etc/sairen/sairen.toml`
//! with environment variable overrides via the `SAIREN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SairenConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sairen/sairen.toml` (system-wide)
/// 3. `~/.config/sairen/sairen.toml` (user XDG config)
/// 4. `./sairen.toml` (local directory)
/// 5. `API_KEY` and `PORT` (the deployment's plain variables)
/// 6. `SAIREN_*` environment variables
pub fn load_config() -> Result<SairenConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SairenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SairenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SairenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SairenConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Config files in merge order, lowest precedence first.
///
/// The user file is skipped when the platform has no config directory.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/sairen/sairen.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("sairen/sairen.toml"));
    }
    paths.push(PathBuf::from("sairen.toml"));
    paths
}

/// Build the Figment used for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    search_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(SairenConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// Maps the unprefixed `API_KEY` and `PORT` variables onto their config keys.
fn legacy_env_provider() -> Env {
    Env::raw().only(&["API_KEY", "PORT"]).map(|key| {
        if key.as_str().eq_ignore_ascii_case("api_key") {
            "openai.api_key".into()
        } else {
            "gateway.port".into()
        }
    })
}

/// Create the `SAIREN_` environment provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SAIREN_OPENAI_API_KEY` must map to `openai.api_key`, not
/// `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("SAIREN_").map(|key| map_section_key(key.as_str()).into())
}

/// Top-level sections that env keys may address.
const SECTIONS: &[&str] = &[
    "agent", "openai", "gateway", "extract", "search", "orders", "memory",
];

/// Rewrites the leading `section_` of an env key to `section.`.
///
/// Keys arrive in their original case and are lowercased first. Only the
/// section prefix is rewritten, so `GATEWAY_EXTRACT_CONCURRENCY` maps to
/// `gateway.extract_concurrency`.
fn map_section_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
