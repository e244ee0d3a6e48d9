// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Sai Ren configuration system.

use std::path::Path;

use sairen_config::diagnostic::ConfigError;
use sairen_config::model::{
    RendererKind, ReplyStyle, SairenConfig, SelectionMode, StatusPolicy,
};
use sairen_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_path, load_config_from_str,
};

#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[agent]
name = "Concierge"
log_level = "debug"

[openai]
api_key = "sk-test"
model = "gpt-4o"

[gateway]
port = 8080
extract_concurrency = 2

[extract]
renderer = "browser"
selection = "document"
min_block_chars = 40

[[references]]
name = "FAQ"
url = "https://example.com/faq"

[[references]]
name = "Policies"
url = "https://example.com/policies"

[search]
reply_style = "top_result"

[orders]
status_policy = "random"
statuses = ["Shipped"]

[memory]
max_turns_per_user = 50
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "Concierge");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.extract_concurrency, 2);
    assert_eq!(config.extract.renderer, RendererKind::Browser);
    assert_eq!(config.extract.selection, SelectionMode::Document);
    assert_eq!(config.extract.min_block_chars, 40);
    assert_eq!(config.references.len(), 2);
    assert_eq!(config.references[1].name, "Policies");
    assert_eq!(config.search.reply_style, ReplyStyle::TopResult);
    assert_eq!(config.orders.status_policy, StatusPolicy::Random);
    assert_eq!(config.orders.statuses, vec!["Shipped"]);
    assert_eq!(config.memory.max_turns_per_user, Some(50));
}

#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "Sai Ren AI");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.openai.api_key.is_none());
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.gateway.port, 5000);
    assert_eq!(config.gateway.extract_concurrency, 1);
    assert_eq!(config.extract.renderer, RendererKind::Static);
    assert_eq!(config.extract.selection, SelectionMode::Candidates);
    assert_eq!(config.references.len(), 1);
    assert_eq!(config.references[0].name, "FAQ");
    assert_eq!(config.search.endpoint, "https://dummyjson.com/products/search");
    assert_eq!(config.search.reply_style, ReplyStyle::Recommendation);
    assert_eq!(config.orders.status_policy, StatusPolicy::Fixed);
    assert_eq!(config.orders.fixed_status, "In progress");
    assert!(config.memory.max_turns_per_user.is_none());
}

#[test]
fn unknown_field_in_gateway_produces_error() {
    let toml = r#"
[gateway]
prot = 80
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field, got: {err_str}"
    );
}

#[test]
fn unknown_field_becomes_diagnostic_with_suggestion() {
    let toml = r#"
[openai]
api_kye = "sk"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "api_kye");
            assert_eq!(suggestion.as_deref(), Some("api_key"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn invalid_enum_value_is_rejected() {
    let toml = r#"
[extract]
renderer = "puppeteer"
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn policy_value_typo_gets_variant_suggestion() {
    let toml = r#"
[search]
reply_style = "top-result"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    match &errors[0] {
        ConfigError::UnknownValue {
            key,
            value,
            suggestion,
            ..
        } => {
            assert_eq!(key, "search.reply_style");
            assert_eq!(value, "top-result");
            assert_eq!(suggestion.as_deref(), Some("top_result"));
        }
        other => panic!("expected UnknownValue, got {other:?}"),
    }
}

#[test]
fn misspelled_section_suggests_its_header() {
    let toml = r#"
[[reference]]
name = "FAQ"
url = "https://example.com/faq"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    match &errors[0] {
        ConfigError::UnknownSection {
            name,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(name, "reference");
            assert_eq!(suggestion.as_deref(), Some("[[references]]"));
            assert!(span.is_some());
        }
        other => panic!("expected UnknownSection, got {other:?}"),
    }
}

#[test]
fn unknown_key_in_second_reference_points_at_that_entry() {
    let toml = r#"
[[references]]
name = "FAQ"
url = "https://example.com/faq"

[[references]]
name = "Policies"
link = "https://example.com/policies"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, section, span, ..
            } => Some((key, section, span)),
            _ => None,
        })
        .expect("an unknown key diagnostic");

    assert_eq!(unknown.0, "link");
    assert_eq!(unknown.1, "[[references]] #2");
    let span = unknown.2.expect("span inside the second entry");
    assert_eq!(&toml[span.offset()..span.offset() + 4], "link");
    assert!(span.offset() > toml.find("Policies").unwrap());
}

#[test]
fn semantic_errors_surface_from_validation() {
    let toml = r#"
[gateway]
extract_concurrency = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("extract_concurrency"))
    ));
}

#[test]
fn reference_without_url_is_missing_key() {
    let toml = r#"
[[references]]
name = "FAQ"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key, section } if key == "url" && section == "[[references]] #1"))
    );
}

#[test]
fn legacy_env_vars_override_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "sairen.toml",
            r#"
[gateway]
port = 7000
"#,
        )?;
        jail.set_env("API_KEY", "sk-from-env");
        jail.set_env("PORT", "8081");

        let config = load_config_from_path(Path::new("sairen.toml"))?;
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(config.gateway.port, 8081);
        Ok(())
    });
}

#[test]
fn prefixed_env_vars_win_over_legacy() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("sairen.toml", "")?;
        jail.set_env("PORT", "8081");
        jail.set_env("SAIREN_GATEWAY_PORT", "9090");
        jail.set_env("SAIREN_GATEWAY_EXTRACT_CONCURRENCY", "4");
        jail.set_env("SAIREN_OPENAI_API_KEY", "sk-prefixed");

        let config = load_config_from_path(Path::new("sairen.toml"))?;
        assert_eq!(config.gateway.port, 9090);
        assert_eq!(config.gateway.extract_concurrency, 4);
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-prefixed"));
        Ok(())
    });
}

#[test]
fn bad_env_value_names_its_origin() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("sairen.toml", "")?;
        jail.set_env("SAIREN_GATEWAY_PORT", "not-a-port");

        let errors = load_and_validate_path(Path::new("sairen.toml"))
            .expect_err("a non-numeric port should fail");
        assert!(
            errors.iter().any(|e| matches!(
                e,
                ConfigError::InvalidType { key, origin, .. }
                    if key == "gateway.port" && origin.contains("SAIREN_")
            )),
            "got: {errors:?}"
        );
        Ok(())
    });
}

#[test]
fn config_round_trips_through_toml() {
    let config = SairenConfig::default();
    let serialized = toml::to_string(&config).expect("should serialize");
    let parsed: SairenConfig = toml::from_str(&serialized).expect("should parse back");
    assert_eq!(parsed.references, config.references);
    assert_eq!(parsed.gateway.port, config.gateway.port);
}
