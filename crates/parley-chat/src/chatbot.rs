//! Chatbot: one chat turn at a time against a bound provider.
//!
//! Validates input, emits lifecycle events around the provider call, and
//! offers fluent helpers that mutate the provider's generation config.

use std::sync::{Arc, PoisonError, RwLockWriteGuard};

use tracing::debug;

use parley_core::events::{EventSink, MessageSent, ResponseReceived};
use parley_core::utils::squish;
use parley_core::{
    ChatHistory, ChatMessage, ChatResponse, ChatbotError, GenerationConfig, ModelId, Result,
};
use parley_providers::ChatbotProvider;

/// Facade over one provider plus an event sink.
#[derive(Clone)]
pub struct Chatbot {
    provider: Arc<dyn ChatbotProvider>,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for Chatbot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatbot")
            .field("provider", &self.provider.display_name())
            .finish()
    }
}

impl Chatbot {
    pub fn new(provider: Arc<dyn ChatbotProvider>, events: Arc<dyn EventSink>) -> Self {
        Chatbot { provider, events }
    }

    pub fn provider(&self) -> &Arc<dyn ChatbotProvider> {
        &self.provider
    }

    /// Set the system-prompt style instruction.
    pub fn with_instruction(&self, instruction: ChatMessage) -> &Self {
        self.config().set_instruction(instruction);
        self
    }

    pub fn use_model(&self, model: impl Into<ModelId>) -> &Self {
        self.config().set_chat_model(model);
        self
    }

    /// Run `f` against the provider's config, e.g. to chain validated setters.
    ///
    /// The config lock is held while `f` runs; `f` must not call back into
    /// this chatbot.
    pub fn with_config<F>(&self, f: F) -> Result<&Self>
    where
        F: FnOnce(&mut GenerationConfig) -> Result<()>,
    {
        f(&mut *self.config())?;
        Ok(self)
    }

    /// Replace the conversation history.
    pub fn with_history(&self, history: ChatHistory) -> &Self {
        self.config().set_chat_history(history);
        self
    }

    /// Snapshot of the current history.
    pub fn history(&self) -> ChatHistory {
        self.provider
            .configuration()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .chat_history()
            .clone()
    }

    /// Append a completed turn to the history. Failed turns are not recorded.
    pub fn record_turn(&self, text: &str, response: &ChatResponse) -> &Self {
        if response.is_success() {
            self.config()
                .chat_history_mut()
                .add_message(ChatMessage::user(text))
                .add_message(ChatMessage::assistant(response.message()));
        }
        self
    }

    /// Send `text` as the next user turn.
    ///
    /// Text that is empty after whitespace collapsing is rejected with
    /// [`ChatbotError::EmptyMessage`], and a provider with no chat model
    /// with [`ChatbotError::ModelNotSet`]; neither emits an event.
    /// `correlation_id` is passed through to both lifecycle events.
    pub async fn chat(&self, text: &str, correlation_id: Option<&str>) -> Result<ChatResponse> {
        if squish(text).is_empty() {
            return Err(ChatbotError::EmptyMessage);
        }
        if !self.has_model() {
            return Err(ChatbotError::ModelNotSet);
        }

        let correlation_id = correlation_id.map(str::to_string);
        self.events
            .emit(MessageSent::new(text, correlation_id.clone()).into());

        debug!(
            provider = self.provider.display_name(),
            chars = text.chars().count(),
            "Sending chat message"
        );
        let response = self.provider.chat(&ChatMessage::user(text)).await?;

        self.events
            .emit(ResponseReceived::new(text, response.clone(), correlation_id).into());

        Ok(response)
    }

    fn has_model(&self) -> bool {
        self.provider
            .configuration()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .chat_model()
            .is_some()
    }

    fn config(&self) -> RwLockWriteGuard<'_, GenerationConfig> {
        self.provider
            .configuration()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
