//! Core types for Parley.
//!
//! - [`types`]: `ChatMessage`, `Role`, `ChatHistory`, `ModelId`, `ChatResponse`
//! - [`generation`]: validated `GenerationConfig`
//! - [`error`]: `ChatbotError`
//! - [`events`]: lifecycle notifications and sinks
//! - [`config`]: config file schema, loader, env overrides

pub mod config;
pub mod error;
pub mod events;
pub mod generation;
pub mod types;
pub mod utils;

pub use error::{ChatbotError, Result};
pub use generation::GenerationConfig;
pub use types::{ChatHistory, ChatMessage, ChatResponse, ModelId, Role};
