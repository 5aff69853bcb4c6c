#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use codecraft_cli::config::{
    BUILTIN_PROVIDER, ConfigFile, DefaultsConfig, ProviderConfig, ResolveOptions, resolve_config,
};
use std::collections::BTreeMap;

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = BTreeMap::new();
    providers.insert(
        "test_provider".to_string(),
        ProviderConfig {
            endpoint: "http://test.local/v1".to_string(),
            api_key: Some("test_key".to_string()),
            api_key_env: None,
            models: vec!["test_model".to_string()],
        },
    );

    ConfigFile {
        codecraft: DefaultsConfig {
            provider: Some("test_provider".to_string()),
            model: Some("config_model".to_string()),
            language: Some("Go".to_string()),
            to: Some("Rust".to_string()),
        },
        providers,
    }
}

#[test]
fn test_config_defaults_used_when_cli_not_specified() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.provider_name, "test_provider");
    assert_eq!(resolved.model, "config_model");
    assert_eq!(resolved.language, "Go");
    assert_eq!(resolved.target_language, "Rust");
    assert_eq!(resolved.api_key.as_deref(), Some("test_key"));
}

#[test]
fn test_cli_languages_override_config_languages() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        language: Some("ts".to_string()),
        to: Some("c++".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.language, "TypeScript");
    assert_eq!(resolved.target_language, "C++");
}

#[test]
fn test_cli_model_overrides_config_model() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        model: Some("cli_model".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.model, "cli_model");
}

#[test]
fn test_cli_provider_overrides_config_provider() {
    let mut config = make_config_with_defaults();
    config.providers.insert(
        "other_provider".to_string(),
        ProviderConfig {
            endpoint: "http://other.local/v1".to_string(),
            api_key: None,
            api_key_env: None,
            models: vec!["other_model".to_string()],
        },
    );
    config.codecraft.model = None;

    let options = ResolveOptions {
        provider: Some("other_provider".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.provider_name, "other_provider");
    assert_eq!(resolved.endpoint, "http://other.local/v1");
    // No model anywhere else: the provider's first model is used.
    assert_eq!(resolved.model, "other_model");
    assert!(resolved.api_key.is_none());
}

#[test]
fn test_builtin_defaults_without_config_file() {
    let config = ConfigFile::default();
    let options = ResolveOptions {
        provider: Some(BUILTIN_PROVIDER.to_string()),
        ..ResolveOptions::default()
    };

    // The built-in provider needs GEMINI_API_KEY; without it resolution fails
    // with a hint naming the variable.
    if std::env::var("GEMINI_API_KEY").is_err() {
        let err = resolve_config(&options, &config).unwrap_err().to_string();
        assert!(err.contains("GEMINI_API_KEY"));
    }
}

#[test]
fn test_invalid_cli_language_returns_error() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        language: Some("Brainfuck".to_string()),
        ..ResolveOptions::default()
    };

    let err = resolve_config(&options, &config).unwrap_err().to_string();
    assert!(err.contains("Unsupported language"));
}

#[test]
fn test_all_cli_options_override_config() {
    let mut config = make_config_with_defaults();
    config.providers.insert(
        "cli_provider".to_string(),
        ProviderConfig {
            endpoint: "http://cli.local/v1".to_string(),
            api_key: Some("cli_key".to_string()),
            api_key_env: None,
            models: vec!["cli_model".to_string()],
        },
    );

    let options = ResolveOptions {
        provider: Some("cli_provider".to_string()),
        model: Some("cli_specified_model".to_string()),
        language: Some("java".to_string()),
        to: Some("sql".to_string()),
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.provider_name, "cli_provider");
    assert_eq!(resolved.model, "cli_specified_model");
    assert_eq!(resolved.language, "Java");
    assert_eq!(resolved.target_language, "SQL");
}
