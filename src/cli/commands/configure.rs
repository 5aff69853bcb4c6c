//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::assistant::{DEFAULT_LANGUAGE, DEFAULT_TARGET_LANGUAGE, SUPPORTED_LANGUAGES};
use crate::config::{BUILTIN_PROVIDER, ConfigFile, ConfigManager, DefaultsConfig};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the saved defaults. Otherwise lets the user pick the
/// default provider, model, source language and conversion target.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if show {
        let config = manager.load_or_default()?;
        print_current_defaults(&config);
        println!(
            "  {}",
            Style::secondary(manager.config_path().display().to_string())
        );
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager))
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let provider_names = config.provider_names();
    let default_provider = config.codecraft.provider.clone();
    let provider = select_provider(&provider_names, default_provider.as_deref())?;

    let available_models = config
        .provider(&provider)
        .map(|p| p.models)
        .unwrap_or_default();

    let default_model = config.codecraft.model.clone();
    let model = select_model(&available_models, default_model.as_deref())?;

    let language = select_language(
        "Default language:",
        config.codecraft.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
    )?;
    let to = select_language(
        "Default conversion target:",
        config.codecraft.to.as_deref().unwrap_or(DEFAULT_TARGET_LANGUAGE),
    )?;

    config.codecraft = DefaultsConfig {
        provider: Some(provider),
        model: Some(model),
        language: Some(language),
        to: Some(to),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let value = |v: Option<&str>| v.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        config.codecraft.provider.as_deref().map_or_else(
            || Style::secondary(format!("{BUILTIN_PROVIDER} (built-in)")),
            Style::value
        )
    );
    println!(
        "  {}     {}",
        Style::label("model"),
        value(config.codecraft.model.as_deref())
    );
    println!(
        "  {}  {}",
        Style::label("language"),
        value(config.codecraft.language.as_deref())
    );
    println!(
        "  {}        {}",
        Style::label("to"),
        value(config.codecraft.to.as_deref())
    );
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        // No models configured, fall back to text input
        let mut prompt = Text::new("Default model:").with_help_message("Enter the model name");

        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }

        let model = prompt.prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        Ok(model.trim().to_string())
    } else {
        let default_index = default
            .and_then(|d| available_models.iter().position(|m| m == d))
            .unwrap_or(0);

        let selection = Select::new("Default model:", available_models.to_vec())
            .with_starting_cursor(default_index)
            .prompt()?;

        Ok(selection)
    }
}

fn select_language(message: &str, default: &str) -> Result<String> {
    let default_index = SUPPORTED_LANGUAGES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(default))
        .unwrap_or(0);

    let selection = Select::new(message, SUPPORTED_LANGUAGES.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection.to_string())
}
