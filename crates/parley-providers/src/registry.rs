//! Handler catalog: static specs for every provider implementation.
//!
//! A config entry names its `handler`; the catalog turns that name into a
//! constructed provider. Adding a vendor means adding one `HandlerSpec`.

use std::sync::Arc;

use parley_core::config::{GenerationDefaults, ProviderConfig};

use crate::gemini::{self, GeminiProvider};
use crate::traits::ChatbotProvider;

/// Builds a provider from its config entry and the shared generation defaults.
pub type ProviderFactory = fn(&ProviderConfig, &GenerationDefaults) -> Arc<dyn ChatbotProvider>;

/// Static specification describing one provider implementation.
#[derive(Clone)]
pub struct HandlerSpec {
    /// Value of `handler` in the config file (e.g. `"gemini"`).
    pub name: &'static str,
    /// Human-readable name for logs and `parley status`.
    pub display_name: &'static str,
    /// Environment variable consulted for the API key.
    pub env_key: &'static str,
    pub default_api_base: &'static str,
    /// Chat models this handler accepts, by wire id.
    pub models: fn() -> Vec<&'static str>,
    pub build: ProviderFactory,
}

impl std::fmt::Debug for HandlerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerSpec")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("env_key", &self.env_key)
            .field("default_api_base", &self.default_api_base)
            .finish()
    }
}

/// Every supported handler.
pub static HANDLERS: &[HandlerSpec] = &[HandlerSpec {
    name: "gemini",
    display_name: "Gemini",
    env_key: "GEMINI_API_KEY",
    default_api_base: gemini::DEFAULT_API_BASE,
    models: gemini_models,
    build: build_gemini,
}];

fn gemini_models() -> Vec<&'static str> {
    gemini::ChatModel::ALL.iter().map(|m| m.api_id()).collect()
}

fn build_gemini(config: &ProviderConfig, defaults: &GenerationDefaults) -> Arc<dyn ChatbotProvider> {
    Arc::new(GeminiProvider::from_config(config).with_generation_defaults(*defaults))
}

/// Find a handler by its config name (case-insensitive).
pub fn find_handler(name: &str) -> Option<&'static HandlerSpec> {
    HANDLERS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Construct the provider for a config entry, if its handler is known.
pub fn build_provider(
    config: &ProviderConfig,
    defaults: &GenerationDefaults,
) -> Option<Arc<dyn ChatbotProvider>> {
    find_handler(&config.handler).map(|spec| (spec.build)(config, defaults))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_handler() {
        let spec = find_handler("gemini").unwrap();
        assert_eq!(spec.display_name, "Gemini");
        assert_eq!(spec.env_key, "GEMINI_API_KEY");
        assert!(find_handler("GEMINI").is_some());
        assert!(find_handler("openai").is_none());
    }

    #[test]
    fn test_handler_names_unique() {
        let mut names: Vec<&str> = HANDLERS.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), HANDLERS.len());
    }

    #[test]
    fn test_gemini_models_listed() {
        let models = (find_handler("gemini").unwrap().models)();
        assert!(models.contains(&"gemini-2.0-flash"));
        assert_eq!(models.len(), gemini::ChatModel::ALL.len());
    }

    #[test]
    fn test_build_provider() {
        let config = ProviderConfig {
            handler: "gemini".to_string(),
            api_key: "k".to_string(),
            model: Some("gemini-1.5-flash".to_string()),
            ..Default::default()
        };
        let provider = build_provider(&config, &GenerationDefaults::default()).unwrap();
        assert_eq!(provider.display_name(), "Gemini");
        let model = provider.configuration().read().unwrap().chat_model();
        assert_eq!(model.map(|m| m.as_str()), Some("gemini-1.5-flash"));
    }

    #[test]
    fn test_build_provider_unknown_handler() {
        let config = ProviderConfig {
            handler: "mystery".to_string(),
            ..Default::default()
        };
        assert!(build_provider(&config, &GenerationDefaults::default()).is_none());
    }
}
