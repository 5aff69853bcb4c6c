//! Provider listing command handler.

use anyhow::Result;

use crate::config::{BUILTIN_PROVIDER, ConfigFile, ConfigManager};
use crate::ui::Style;

/// Prints available providers to stdout.
///
/// If `specific_provider` is provided, shows detailed information for that provider.
/// Otherwise, lists every provider with its endpoint and models. The built-in
/// provider is always listed unless the config file overrides it.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    let default_provider = config
        .codecraft
        .provider
        .as_deref()
        .unwrap_or(BUILTIN_PROVIDER);

    if let Some(provider_name) = specific_provider {
        let Some(provider) = config.provider(provider_name) else {
            anyhow::bail!("Provider '{provider_name}' not found");
        };

        println!(
            "Provider: {}{}{}",
            Style::value(provider_name),
            default_suffix(provider_name == default_provider),
            builtin_suffix(&config, provider_name)
        );
        println!("  endpoint = {}", provider.endpoint);
        if provider.requires_api_key() {
            let has_key = provider.get_api_key().is_some();
            println!(
                "  api_key  = {}",
                if has_key { "(set)" } else { "(not set)" }
            );
        }
        if provider.models.is_empty() {
            println!("  models   = (none configured)");
        } else {
            println!("  models:");
            for model in &provider.models {
                println!("    - {model}");
            }
        }
        return Ok(());
    }

    println!("{}\n", Style::header("Available providers"));
    for name in config.provider_names() {
        let Some(provider) = config.provider(&name) else {
            continue;
        };
        println!(
            "  {}{}{}",
            Style::value(&name),
            default_suffix(name == default_provider),
            builtin_suffix(&config, &name)
        );
        println!("    endpoint: {}", Style::secondary(&provider.endpoint));
        if !provider.models.is_empty() {
            println!("    models: {}", provider.models.join(", "));
        }
    }

    Ok(())
}

fn default_suffix(is_default: bool) -> String {
    if is_default {
        format!(" {}", Style::default_marker())
    } else {
        String::new()
    }
}

fn builtin_suffix(config: &ConfigFile, name: &str) -> String {
    if name == BUILTIN_PROVIDER && !config.providers.contains_key(name) {
        format!(" {}", Style::secondary("(built-in)"))
    } else {
        String::new()
    }
}
