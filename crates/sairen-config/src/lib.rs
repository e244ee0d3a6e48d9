// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Sai Ren assistant.
//!
//! `sairen.toml` is merged from the XDG hierarchy, then overridden by the
//! plain `API_KEY`/`PORT` variables and `SAIREN_*` variables. Unknown keys
//! are rejected, and the result is validated as a whole so one run reports
//! every problem.
//!
//! ```no_run
//! let config = match sairen_config::load_and_validate() {
//!     Ok(config) => config,
//!     Err(errors) => {
//!         sairen_config::render_errors(&errors);
//!         std::process::exit(1);
//!     }
//! };
//! println!("{} reference pages", config.references.len());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::SairenConfig;

/// Loads from the XDG hierarchy and environment, then validates.
pub fn load_and_validate() -> Result<SairenConfig, Vec<ConfigError>> {
    checked(loader::load_config(), || {
        loader::search_paths()
            .into_iter()
            .filter_map(read_source)
            .collect()
    })
}

/// Loads `path` plus the environment, then validates.
pub fn load_and_validate_path(path: &Path) -> Result<SairenConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_path(path), || {
        read_source(path.to_path_buf()).into_iter().collect()
    })
}

/// Loads an inline TOML document without consulting the environment.
pub fn load_and_validate_str(toml_content: &str) -> Result<SairenConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validates a loaded config, or turns the load error into diagnostics.
///
/// Sources are only read when there is an error to point into.
fn checked(
    loaded: Result<SairenConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<SairenConfig, Vec<ConfigError>> {
    let config = loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Reads a config file keyed by the absolute path figment reports for it.
fn read_source(path: PathBuf) -> Option<(String, String)> {
    let content = std::fs::read_to_string(&path).ok()?;
    let absolute = std::path::absolute(&path).unwrap_or(path);
    Some((absolute.display().to_string(), content))
}
