mod manager;

pub use manager::{
    BUILTIN_PROVIDER, ConfigFile, ConfigManager, DefaultsConfig, ProviderConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
