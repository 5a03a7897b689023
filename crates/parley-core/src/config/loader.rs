//! Config loader: reads `~/.parley/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.parley/config.json`
//! 3. Environment variables `PARLEY_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from `path` (or the default path) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `PARLEY_DEFAULT_PROVIDER` → `defaultProvider`
/// - `PARLEY_PROVIDERS__<NAME>__API_KEY` → `chatbot.providers.<name>.apiKey`
/// - `PARLEY_PROVIDERS__<NAME>__API_BASE` → `chatbot.providers.<name>.apiBase`
/// - `PARLEY_PROVIDERS__<NAME>__MODEL` → `chatbot.providers.<name>.model`
/// - `GEMINI_API_KEY` → api key of any gemini-handled provider whose key is still empty
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("PARLEY_DEFAULT_PROVIDER") {
        config.default_provider = if val.is_empty() { None } else { Some(val) };
    }

    for (name, provider) in config.chatbot.providers.iter_mut() {
        apply_provider_env(provider, &name.to_uppercase());
    }

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        for provider in config.chatbot.providers.values_mut() {
            if provider.handler == "gemini" && provider.api_key.is_empty() {
                provider.api_key = key.clone();
            }
        }
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("PARLEY_PROVIDERS__{name}__API_KEY")) {
        provider.api_key = val;
    }
    if let Ok(val) = std::env::var(format!("PARLEY_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if let Ok(val) = std::env::var(format!("PARLEY_PROVIDERS__{name}__MODEL")) {
        provider.model = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
