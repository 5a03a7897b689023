//! Provider traits: the seam between the uniform chat interface and vendors.
//!
//! A new vendor integration implements [`ChatbotProvider`] and supplies its
//! own request/response translation without touching any other component.

use std::sync::RwLock;

use async_trait::async_trait;
use parley_core::{ChatMessage, ChatResponse, GenerationConfig, Result};

/// Trait that all chatbot providers must implement.
#[async_trait]
pub trait ChatbotProvider: Send + Sync {
    /// The provider's generation config.
    ///
    /// Created on first access and the same instance for the provider's
    /// whole lifetime. One conversation per provider instance: callers that
    /// need independent histories should build independent providers.
    fn configuration(&self) -> &RwLock<GenerationConfig>;

    /// Send one user turn, with the configured history and instruction.
    ///
    /// # Returns
    /// A normalized response for every HTTP outcome, including vendor
    /// errors and network faults. `Err` is reserved for configuration
    /// problems detected before sending (e.g. no model selected).
    async fn chat(&self, message: &ChatMessage) -> Result<ChatResponse>;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}

/// Text embedding capability.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `text`. Returns an empty vector if the vendor call failed.
    async fn embed_content(&self, text: &str) -> Vec<f32>;
}
