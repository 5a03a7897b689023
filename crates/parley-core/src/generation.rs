//! Generation parameters bound to one provider instance.
//!
//! Range checks happen in the setters, so a `GenerationConfig` that exists
//! is always valid and request builders pass its values through verbatim.

use crate::config::schema::GenerationDefaults;
use crate::error::{ChatbotError, Result};
use crate::types::{ChatHistory, ChatMessage, ModelId};

/// Sampling parameters, model choice, instruction, and history.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Higher values (e.g. 1.0) make output more random; lower values
    /// (e.g. 0.2) make it more focused.
    temperature: f64,
    /// Upper bound on generated tokens. Always > 0.
    max_output_tokens: u32,
    /// Nucleus sampling mass, in `[0, 1]`.
    top_p: f64,
    /// Only the `top_k` most probable tokens are considered.
    top_k: u32,
    /// System-prompt style instruction, sent outside the turn list.
    instruction: Option<ChatMessage>,
    /// Unset until the caller (or provider defaults) picks a model.
    chat_model: Option<ModelId>,
    chat_history: ChatHistory,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_output_tokens: 800,
            top_p: 0.8,
            top_k: 10,
            instruction: None,
            chat_model: None,
            chat_history: ChatHistory::new(),
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the `generation` section of the config file,
    /// running every value through the same checks as the setters.
    pub fn from_defaults(defaults: &GenerationDefaults) -> Result<Self> {
        let mut config = Self::default();
        config
            .set_temperature(defaults.temperature)
            .set_max_output_tokens(defaults.max_output_tokens)?
            .set_top_p(defaults.top_p)?
            .set_top_k(defaults.top_k)?;
        Ok(config)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f64) -> &mut Self {
        self.temperature = temperature;
        self
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Fails with [`ChatbotError::InvalidMaxOutputTokens`] for values `<= 0`
    /// or above `u32::MAX`.
    pub fn set_max_output_tokens(&mut self, max_output_tokens: i64) -> Result<&mut Self> {
        self.max_output_tokens = u32::try_from(max_output_tokens)
            .ok()
            .filter(|&tokens| tokens > 0)
            .ok_or(ChatbotError::InvalidMaxOutputTokens(max_output_tokens))?;
        Ok(self)
    }

    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    /// Fails with [`ChatbotError::InvalidTopP`] outside `[0, 1]`. Bounds are inclusive.
    pub fn set_top_p(&mut self, top_p: f64) -> Result<&mut Self> {
        if !(0.0..=1.0).contains(&top_p) {
            return Err(ChatbotError::InvalidTopP(top_p));
        }
        self.top_p = top_p;
        Ok(self)
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    /// Fails with [`ChatbotError::InvalidTopK`] for negative values or values
    /// above `u32::MAX`.
    pub fn set_top_k(&mut self, top_k: i64) -> Result<&mut Self> {
        self.top_k = u32::try_from(top_k).map_err(|_| ChatbotError::InvalidTopK(top_k))?;
        Ok(self)
    }

    pub fn instruction(&self) -> Option<&ChatMessage> {
        self.instruction.as_ref()
    }

    pub fn set_instruction(&mut self, instruction: ChatMessage) -> &mut Self {
        self.instruction = Some(instruction);
        self
    }

    pub fn clear_instruction(&mut self) -> &mut Self {
        self.instruction = None;
        self
    }

    pub fn chat_model(&self) -> Option<ModelId> {
        self.chat_model
    }

    pub fn set_chat_model(&mut self, model: impl Into<ModelId>) -> &mut Self {
        self.chat_model = Some(model.into());
        self
    }

    /// Prior turns. Empty (never absent) when no history was set.
    pub fn chat_history(&self) -> &ChatHistory {
        &self.chat_history
    }

    pub fn chat_history_mut(&mut self) -> &mut ChatHistory {
        &mut self.chat_history
    }

    pub fn set_chat_history(&mut self, history: ChatHistory) -> &mut Self {
        self.chat_history = history;
        self
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
