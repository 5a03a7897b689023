//! Error taxonomy for configuration-time failures.
//!
//! Request-time failures (bad API key, unknown model, network faults) are
//! not errors: providers report them inside [`crate::types::ChatResponse`].

use thiserror::Error;

/// Errors raised before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatbotError {
    #[error("Chat message cannot be empty.")]
    EmptyMessage,

    #[error("Invalid max output tokens: {0}. It must be a positive integer.")]
    InvalidMaxOutputTokens(i64),

    #[error("Invalid top P value: {0}. It must be between 0 and 1.")]
    InvalidTopP(f64),

    #[error("Invalid top K value: {0}. It must be a non-negative integer.")]
    InvalidTopK(i64),

    #[error("Chatbot provider '{0}' is not registered.")]
    UnknownProvider(String),

    #[error("No chatbot provider given and no default provider is registered.")]
    NoDefaultProvider,

    #[error("No chat model selected. Call use_model() or configure a default model.")]
    ModelNotSet,
}

pub type Result<T, E = ChatbotError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_value() {
        assert_eq!(
            ChatbotError::InvalidMaxOutputTokens(-5).to_string(),
            "Invalid max output tokens: -5. It must be a positive integer."
        );
        assert_eq!(
            ChatbotError::InvalidTopP(1.5).to_string(),
            "Invalid top P value: 1.5. It must be between 0 and 1."
        );
        assert_eq!(
            ChatbotError::InvalidTopK(-1).to_string(),
            "Invalid top K value: -1. It must be a non-negative integer."
        );
    }

    #[test]
    fn test_unknown_provider_names_provider() {
        let err = ChatbotError::UnknownProvider("openai".into());
        assert!(err.to_string().contains("'openai'"));
    }

    #[test]
    fn test_empty_message_text() {
        assert_eq!(
            ChatbotError::EmptyMessage.to_string(),
            "Chat message cannot be empty."
        );
    }
}
