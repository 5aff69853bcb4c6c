use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::assistant::{DEFAULT_LANGUAGE, DEFAULT_TARGET_LANGUAGE, resolve_language};
use crate::paths;
use crate::ui::Style;

/// Provider used when neither the CLI nor the config file names one.
pub const BUILTIN_PROVIDER: &str = "gemini";

const BUILTIN_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const BUILTIN_API_KEY_ENV: &str = "GEMINI_API_KEY";
const BUILTIN_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-pro"];

/// Default settings in the `[codecraft]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Default source language (e.g. "Python").
    pub language: Option<String>,
    /// Default target language for conversion.
    pub to: Option<String>,
}

/// Configuration for a model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenAI-compatible base URL, including the version prefix.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Models offered by this provider; the first one is the fallback model.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// The provider used out of the box: Gemini's OpenAI-compatible endpoint.
    pub fn builtin() -> Self {
        Self {
            endpoint: BUILTIN_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: Some(BUILTIN_API_KEY_ENV.to_string()),
            models: BUILTIN_MODELS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/codecraft/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub codecraft: DefaultsConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl ConfigFile {
    /// Looks up a provider, falling back to the built-in one by name.
    pub fn provider(&self, name: &str) -> Option<ProviderConfig> {
        self.providers
            .get(name)
            .cloned()
            .or_else(|| (name == BUILTIN_PROVIDER).then(ProviderConfig::builtin))
    }

    /// Configured provider names, plus the built-in one if not overridden.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        if !self.providers.contains_key(BUILTIN_PROVIDER) {
            names.push(BUILTIN_PROVIDER.to_string());
        }
        names
    }
}

/// Resolved configuration after merging CLI arguments, config file and built-in defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The selected provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The model to call.
    pub model: String,
    /// The API key (if required).
    pub api_key: Option<String>,
    /// Canonical source language.
    pub language: &'static str,
    /// Canonical conversion target language.
    pub target_language: &'static str,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub to: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI options, then the config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error if the provider is unknown, no model can be determined,
/// a language is unsupported, or a required API key is missing.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.codecraft.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| BUILTIN_PROVIDER.to_string());

    let provider_config = config_file.provider(&provider_name).ok_or_else(|| {
        anyhow::anyhow!(
            "Provider '{provider_name}' not found\n\n\
             Available providers:\n  \
             - {}\n\n\
             Add providers to ~/.config/codecraft/config.toml",
            config_file.provider_names().join("\n  - ")
        )
    })?;

    let model = options
        .model
        .as_ref()
        .or(config_file.codecraft.model.as_ref())
        .or(provider_config.models.first())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model'\n\n\
                 Please provide it via:\n  \
                 - CLI option: codecraft --model <name>\n  \
                 - Config file: ~/.config/codecraft/config.toml"
            )
        })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let language = resolve_language(
        options
            .language
            .as_deref()
            .or(config_file.codecraft.language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE),
    )?;

    let target_language = resolve_language(
        options
            .to
            .as_deref()
            .or(config_file.codecraft.to.as_deref())
            .unwrap_or(DEFAULT_TARGET_LANGUAGE),
    )?;

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/codecraft/config.toml"
        );
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint,
        model,
        api_key,
        language,
        target_language,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/codecraft/config.toml`
    /// or `~/.config/codecraft/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        crate::fs::atomic_write(&self.config_path, &contents)
    }

    /// Loads the config file; a missing file yields defaults, a broken one is an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
