//! Configuration schema.
//!
//! Hierarchy: `Config` → `ChatbotConfig` → `ProviderConfig` (one per
//! registered provider name), plus `GenerationDefaults`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration: loaded from `~/.parley/config.json` + env vars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Provider name to resolve when a caller does not pick one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    pub chatbot: ChatbotConfig,
    pub generation: GenerationDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: Some("gemini".to_string()),
            chatbot: ChatbotConfig::default(),
            generation: GenerationDefaults::default(),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Provider entries keyed by the name they register under.
///
/// `BTreeMap` keeps registration order deterministic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatbotConfig {
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            "gemini".to_string(),
            ProviderConfig {
                handler: "gemini".to_string(),
                ..Default::default()
            },
        );
        Self { providers }
    }
}

/// Configuration for one registered provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Handler implementing this provider (e.g. `"gemini"`).
    pub handler: String,
    /// API key credential.
    pub api_key: String,
    /// Custom API base URL (overrides the handler default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Wire id of the model selected when the caller does not pick one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────

/// Starting generation parameters for every provider built from config.
///
/// Signed integers so out-of-range file values reach validation instead
/// of failing deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationDefaults {
    pub temperature: f64,
    pub max_output_tokens: i64,
    pub top_p: f64,
    pub top_k: i64,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_output_tokens: 800,
            top_p: 0.8,
            top_k: 10,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
