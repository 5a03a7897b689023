//! Entry point: builds chatbots bound to a provider from the registry.

use std::sync::Arc;

use parley_core::config::Config;
use parley_core::events::{EventSink, TracingSink};
use parley_core::{ChatbotError, Result};
use parley_providers::{ChatbotProvider, ProvidersManager};

use crate::chatbot::Chatbot;

/// Chatbot factory over a shared provider registry.
#[derive(Clone)]
pub struct Ai {
    providers: ProvidersManager,
    events: Arc<dyn EventSink>,
}

impl Ai {
    pub fn new(providers: ProvidersManager, events: Arc<dyn EventSink>) -> Self {
        Ai { providers, events }
    }

    /// Registry built from `config`, events logged through `tracing`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ProvidersManager::from_config(config), Arc::new(TracingSink))
    }

    pub fn providers(&self) -> &ProvidersManager {
        &self.providers
    }

    /// A chatbot bound to `provider`, or to the registry default.
    pub fn chatbot(&self, provider: Option<Arc<dyn ChatbotProvider>>) -> Result<Chatbot> {
        let provider = provider
            .or_else(|| self.providers.get_default())
            .ok_or(ChatbotError::NoDefaultProvider)?;
        Ok(Chatbot::new(provider, self.events.clone()))
    }

    /// A chatbot bound to the provider registered as `name`.
    pub fn chatbot_named(&self, name: &str) -> Result<Chatbot> {
        let provider = self
            .providers
            .get(name)
            .ok_or_else(|| ChatbotError::UnknownProvider(name.to_string()))?;
        Ok(Chatbot::new(provider, self.events.clone()))
    }
}
