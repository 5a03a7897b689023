//! Provider layer for Parley.
//!
//! # Architecture
//!
//! - [`traits::ChatbotProvider`]: trait that all providers implement
//! - [`gemini`]: Google Gemini adapter (request builder, response normalizer, models)
//! - [`registry`]: static catalog of handlers, keyed by the config `handler` name
//! - [`manager::ProvidersManager`]: named, shared registry with default resolution

pub mod gemini;
pub mod manager;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use gemini::{ChatModel, EmbeddingModel, GeminiProvider};
pub use manager::ProvidersManager;
pub use registry::{build_provider, find_handler, HandlerSpec, HANDLERS};
pub use traits::{ChatbotProvider, EmbeddingProvider};
