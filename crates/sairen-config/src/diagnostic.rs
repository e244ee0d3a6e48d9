// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment errors rendered as miette diagnostics for `sairen.toml`.
//!
//! Errors are described the way the file is written. Unknown top-level keys
//! are compared against the section headers (`[orders]`, `[[references]]`),
//! spans are resolved inside array-of-table entries as well as plain tables,
//! and unrecognized policy values (`renderer`, `selection`, `reply_style`,
//! `status_policy`) are matched against their variants.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Top-level sections, and whether each one is an array of tables.
const SECTIONS: &[(&str, bool)] = &[
    ("agent", false),
    ("openai", false),
    ("gateway", false),
    ("extract", false),
    ("references", true),
    ("search", false),
    ("orders", false),
    ("memory", false),
];

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A top-level key that names no section.
    #[error("unknown section `{name}`")]
    #[diagnostic(
        code(sairen::config::unknown_section),
        help("{}", section_help(suggestion.as_deref()))
    )]
    UnknownSection {
        name: String,
        /// Closest section, written as its header.
        suggestion: Option<String>,
        #[label("not a sairen.toml section")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key its section does not define.
    #[error("unknown key `{key}` in {section}")]
    #[diagnostic(
        code(sairen::config::unknown_key),
        help("{}", choice_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Enclosing table as written, e.g. `[gateway]` or `[[references]] #2`.
        section: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A policy value that names no variant, e.g. `renderer = "chrome"`.
    #[error("`{key}` does not accept \"{value}\"")]
    #[diagnostic(
        code(sairen::config::unknown_value),
        help("{}", choice_help(suggestion.as_deref(), expected))
    )]
    UnknownValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        expected: String,
    },

    /// A value of the wrong type, from a file or an environment variable.
    #[error("invalid type for `{key}` in {origin}: {detail}")]
    #[diagnostic(code(sairen::config::invalid_type))]
    InvalidType {
        key: String,
        detail: String,
        /// Provider that supplied the value.
        origin: String,
    },

    /// A required key is absent, e.g. `url` in a `[[references]]` entry.
    #[error("missing required key `{key}` in {section}")]
    #[diagnostic(
        code(sairen::config::missing_key),
        help("add `{key} = <value>` under {section}")
    )]
    MissingKey { key: String, section: String },

    /// A value that parsed but is not usable.
    #[error("validation error: {message}")]
    #[diagnostic(code(sairen::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(sairen::config::other))]
    Other(String),
}

fn section_help(suggestion: Option<&str>) -> String {
    let all: Vec<String> = SECTIONS.iter().map(|(name, _)| section_header(name)).collect();
    match suggestion {
        Some(s) => format!("did you mean {s}? Sections: {}", all.join(", ")),
        None => format!("sections: {}", all.join(", ")),
    }
}

fn choice_help(suggestion: Option<&str>, choices: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid: {choices}"),
        None => format!("valid: {choices}"),
    }
}

/// The header a section is written under.
fn section_header(name: &str) -> String {
    if is_array_section(name) {
        format!("[[{name}]]")
    } else {
        format!("[{name}]")
    }
}

fn is_array_section(name: &str) -> bool {
    SECTIONS.iter().any(|(s, array)| *s == name && *array)
}

/// Describes the table a figment path points into.
fn describe_table(path: &[String]) -> String {
    match (path.first(), entry_index(path)) {
        (None, _) => "the top level".to_string(),
        (Some(section), Some(i)) => format!("{} #{}", section_header(section), i + 1),
        (Some(section), None) => section_header(section),
    }
}

/// The array entry a path points into, if any.
fn entry_index(path: &[String]) -> Option<usize> {
    path.get(1).and_then(|segment| segment.parse().ok())
}

/// Renders a figment path the way validation messages do: `references[1].url`.
pub fn render_path(path: &[String]) -> String {
    let mut out = String::new();
    for segment in path {
        if segment.parse::<usize>().is_ok() {
            out.push_str(&format!("[{segment}]"));
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(segment);
        }
    }
    out
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// `toml_sources` pairs each file path with its content; spans are resolved
/// against the file the error came from.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) if error.path.is_empty() => {
                let (span, src) = locate(&error, field, toml_sources);
                ConfigError::UnknownSection {
                    name: field.clone(),
                    suggestion: suggest_key(field, expected).map(|s| section_header(&s)),
                    span,
                    src,
                }
            }
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    section: describe_table(&error.path),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::UnknownVariant(value, expected) => ConfigError::UnknownValue {
                key: render_path(&error.path),
                value: value.clone(),
                suggestion: suggest_key(value, expected),
                expected: expected.join(", "),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: render_path(&error.path),
                detail: format!("found {actual}, expected {expected}"),
                origin: error
                    .metadata
                    .as_ref()
                    .map(|m| m.name.to_string())
                    .unwrap_or_else(|| "configuration".to_string()),
            },
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.to_string(),
                section: describe_table(&error.path),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Finds the span of `field` in whichever TOML source produced `error`.
fn locate(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline sources have no path; a single inline entry is unambiguous.
    let source = match source_path {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    match source {
        Some((path, content)) => match find_key_offset(content, &error.path, field) {
            Some(offset) => (
                Some(SourceSpan::new(offset.into(), field.len())),
                Some(NamedSource::new(path, content.clone())),
            ),
            None => (None, None),
        },
        None => (None, None),
    }
}

/// Each line of `content` with its byte offset.
fn lines_with_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// The table name of a `[name]` or `[[name]]` header line.
fn header_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if let Some(inner) = trimmed.strip_prefix("[[") {
        return inner.split_once("]]").map(|(name, _)| name.trim());
    }
    trimmed
        .strip_prefix('[')
        .and_then(|inner| inner.split_once(']'))
        .map(|(name, _)| name.trim())
}

/// Byte range of a table's body: after its header, up to the next header.
///
/// For array sections, `index` picks the entry (0-based).
fn table_region(content: &str, section: &str, index: Option<usize>) -> Option<(usize, usize)> {
    let mut seen = 0;
    let mut start = None;

    for (offset, line) in lines_with_offsets(content) {
        let Some(name) = header_name(line) else {
            continue;
        };
        if let Some(begin) = start {
            return Some((begin, offset));
        }
        if name == section {
            if index.is_none_or(|wanted| wanted == seen) {
                start = Some(offset + line.len());
            }
            seen += 1;
        }
    }

    start.map(|begin| (begin, content.len()))
}

/// Find the byte offset of a key in TOML content, relative to a figment path.
///
/// `["gateway"]` searches the `[gateway]` table; `["references", "1"]`
/// searches the second `[[references]]` entry. With an empty path the key
/// is looked up before the first header, then as a header itself, so an
/// unknown section such as `[order]` is found too.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let (start, end) = match path.first() {
        Some(section) => table_region(content, section, entry_index(path))?,
        None => {
            let first_header = lines_with_offsets(content)
                .find(|(_, line)| header_name(line).is_some())
                .map_or(content.len(), |(offset, _)| offset);
            (0, first_header)
        }
    };

    let assignment = lines_with_offsets(&content[start..end]).find_map(|(offset, line)| {
        let trimmed = line.trim_start();
        let after = trimmed.strip_prefix(field)?;
        after
            .starts_with([' ', '=', '\t'])
            .then(|| start + offset + (line.len() - trimmed.len()))
    });

    if assignment.is_some() || !path.is_empty() {
        return assignment;
    }

    lines_with_offsets(content).find_map(|(offset, line)| match header_name(line) {
        Some(name) if name == field => line.find(field).map(|col| offset + col),
        _ => None,
    })
}

/// Suggest a similar name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// nothing is close enough.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|&candidate| (candidate, strsim::jaro_winkler(unknown, candidate)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
