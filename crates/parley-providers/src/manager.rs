//! Named registry of chatbot providers.
//!
//! `ProvidersManager` is a cheap, clone-able handle; all clones see the same
//! registrations. Built either by hand or from the config file.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use parley_core::config::Config;
use parley_core::{ChatbotError, Result};

use crate::registry::find_handler;
use crate::traits::ChatbotProvider;

#[derive(Default)]
struct Registry {
    providers: HashMap<String, Arc<dyn ChatbotProvider>>,
    default_name: Option<String>,
}

/// Shared registry of providers keyed by name.
#[derive(Clone, Default)]
pub struct ProvidersManager {
    inner: Arc<RwLock<Registry>>,
}

impl std::fmt::Debug for ProvidersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.read();
        let mut names: Vec<&String> = registry.providers.keys().collect();
        names.sort();
        f.debug_struct("ProvidersManager")
            .field("providers", &names)
            .field("default_name", &registry.default_name)
            .finish()
    }
}

impl ProvidersManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `config.chatbot.providers`.
    ///
    /// Entries whose handler is not in the catalog are skipped with a
    /// warning. A `defaultProvider` naming an unregistered provider is
    /// ignored.
    pub fn from_config(config: &Config) -> Self {
        let manager = Self::new();

        for (name, provider_config) in &config.chatbot.providers {
            let Some(spec) = find_handler(&provider_config.handler) else {
                warn!(
                    provider = %name,
                    handler = %provider_config.handler,
                    "Unknown provider handler, skipping"
                );
                continue;
            };

            if !provider_config.is_configured() {
                debug!(provider = %name, env_key = spec.env_key, "Provider has no API key");
            }

            manager.register(name.clone(), (spec.build)(provider_config, &config.generation));
        }

        if let Some(default_name) = config.default_provider.as_deref() {
            if let Err(e) = manager.set_default(default_name) {
                debug!(error = %e, "Configured default provider not registered");
            }
        }

        manager
    }

    /// Register `provider` under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, provider: Arc<dyn ChatbotProvider>) -> &Self {
        let name = name.into();
        info!(provider = %name, display_name = provider.display_name(), "Registered provider");
        self.write().providers.insert(name, provider);
        self
    }

    /// Mark `name` as the default provider.
    pub fn set_default(&self, name: &str) -> Result<&Self> {
        let mut registry = self.write();
        if !registry.providers.contains_key(name) {
            return Err(ChatbotError::UnknownProvider(name.to_string()));
        }
        registry.default_name = Some(name.to_string());
        Ok(self)
    }

    /// Resolve the default provider.
    ///
    /// A sole registered provider always wins; otherwise the one named by
    /// [`set_default`](Self::set_default), if it is still registered.
    pub fn get_default(&self) -> Option<Arc<dyn ChatbotProvider>> {
        let registry = self.read();

        if registry.providers.len() == 1 {
            return registry.providers.values().next().cloned();
        }

        registry
            .default_name
            .as_deref()
            .and_then(|name| registry.providers.get(name))
            .cloned()
    }

    /// Name the default resolves through, if any.
    pub fn default_name(&self) -> Option<String> {
        self.read().default_name.clone()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ChatbotProvider>> {
        self.read().providers.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.read().providers.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.read().providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.read().providers.len()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of every registration.
    pub fn all(&self) -> HashMap<String, Arc<dyn ChatbotProvider>> {
        self.read().providers.clone()
    }

    /// Remove every provider. The default name is kept and resolves again
    /// once a provider is registered under it.
    pub fn clear(&self) {
        self.write().providers.clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
