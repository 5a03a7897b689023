//! Google Gemini integration.
//!
//! - [`models`]: chat and embedding model catalogs
//! - [`roles`]: role mapping for `contents[].role`
//! - [`text_generation`]: `generateContent` request builder and transport
//! - [`response`]: response normalization
//! - [`provider::GeminiProvider`]: the [`ChatbotProvider`](crate::ChatbotProvider) implementation

pub mod embedding;
pub mod models;
pub mod provider;
pub mod response;
pub mod roles;
pub mod text_generation;

pub use models::{ChatModel, EmbeddingModel, UnknownModel};
pub use provider::{GeminiProvider, DEFAULT_API_BASE};
pub use response::TextGenerationResponse;
pub use text_generation::TextGeneration;
