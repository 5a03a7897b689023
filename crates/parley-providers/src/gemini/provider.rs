//! Gemini chatbot provider.

use std::sync::{OnceLock, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use parley_core::config::{GenerationDefaults, ProviderConfig};
use parley_core::{ChatMessage, ChatResponse, GenerationConfig, Result};

use super::models::{ChatModel, EmbeddingModel};
use super::text_generation::TextGeneration;
use crate::traits::ChatbotProvider;

/// Public Gemini endpoint host.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// HTTP timeout for every Gemini call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ─────────────────────────────────────────────
// GeminiProvider
// ─────────────────────────────────────────────

/// Talks to the Gemini generative-language API.
///
/// Owns exactly one [`GenerationConfig`], created on first access from the
/// provider's generation defaults and default model.
pub struct GeminiProvider {
    /// HTTP client (shared, connection-pooled).
    pub(crate) client: reqwest::Client,
    pub(crate) api_base: String,
    pub(crate) api_key: String,
    pub(crate) embedding_model: EmbeddingModel,
    default_model: Option<ChatModel>,
    generation_defaults: GenerationDefaults,
    config: OnceLock<RwLock<GenerationConfig>>,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

impl GeminiProvider {
    /// Create a provider for the public endpoint with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiProvider {
            client: build_client(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            embedding_model: EmbeddingModel::TextEmbedding004,
            default_model: None,
            generation_defaults: GenerationDefaults::default(),
            config: OnceLock::new(),
        }
    }

    /// Create a provider from a config entry.
    ///
    /// An unrecognized `model` is logged and ignored; the caller then has to
    /// pick a model before chatting.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut provider = Self::new(config.api_key.clone());

        if let Some(base) = config.api_base.as_deref().filter(|b| !b.is_empty()) {
            provider.api_base = base.to_string();
        }

        if let Some(model) = config.model.as_deref() {
            match model.parse::<ChatModel>() {
                Ok(m) => provider.default_model = Some(m),
                Err(e) => warn!(error = %e, "Ignoring configured default model"),
            }
        }

        provider
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Model selected in a fresh configuration.
    pub fn with_default_model(mut self, model: ChatModel) -> Self {
        self.default_model = Some(model);
        self
    }

    pub fn with_embedding_model(mut self, model: EmbeddingModel) -> Self {
        self.embedding_model = model;
        self
    }

    /// Starting parameters for the configuration. Only takes effect if the
    /// configuration has not been accessed yet.
    pub fn with_generation_defaults(mut self, defaults: GenerationDefaults) -> Self {
        self.generation_defaults = defaults;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn default_model(&self) -> Option<ChatModel> {
        self.default_model
    }

    /// Whether an API key is set.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn initial_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::from_defaults(&self.generation_defaults)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Invalid generation defaults, using built-in values");
                GenerationConfig::default()
            });
        if let Some(model) = self.default_model {
            config.set_chat_model(model);
        }
        debug!(model = ?self.default_model, "Created Gemini generation config");
        config
    }
}

#[async_trait]
impl ChatbotProvider for GeminiProvider {
    fn configuration(&self) -> &RwLock<GenerationConfig> {
        self.config
            .get_or_init(|| RwLock::new(self.initial_config()))
    }

    async fn chat(&self, message: &ChatMessage) -> Result<ChatResponse> {
        // Snapshot the request while holding the read lock; no lock across I/O.
        let generation = {
            let config = self
                .configuration()
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            TextGeneration::new(message, &config)?
        };

        let response = generation
            .generate(&self.client, &self.api_base, &self.api_key)
            .await;

        Ok(response.into_chat_response())
    }

    fn display_name(&self) -> &str {
        "Gemini"
    }
}

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build HTTP client, using defaults");
            reqwest::Client::new()
        })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::response::NO_RESPONSE_MESSAGE;
    use parley_core::{ChatHistory, ChatbotError};
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FLASH_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn make_config(api_key: &str, api_base: Option<&str>, model: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            handler: "gemini".to_string(),
            api_key: api_key.to_string(),
            api_base: api_base.map(String::from),
            model: model.map(String::from),
        }
    }

    fn mock_provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new("test-key")
            .with_api_base(server.uri())
            .with_default_model(ChatModel::Gemini2_0Flash)
    }

    // ── Unit tests ──

    #[test]
    fn test_from_config_defaults() {
        let provider = GeminiProvider::from_config(&make_config("key", None, None));
        assert_eq!(provider.api_base(), DEFAULT_API_BASE);
        assert!(provider.default_model().is_none());
        assert!(provider.is_configured());
    }

    #[test]
    fn test_from_config_overrides() {
        let provider = GeminiProvider::from_config(&make_config(
            "",
            Some("http://localhost:9999"),
            Some("gemini-1.5-pro"),
        ));
        assert_eq!(provider.api_base(), "http://localhost:9999");
        assert_eq!(provider.default_model(), Some(ChatModel::Gemini1_5Pro));
        assert!(!provider.is_configured());
    }

    #[test]
    fn test_from_config_unknown_model_ignored() {
        let provider = GeminiProvider::from_config(&make_config("key", None, Some("gpt-4o")));
        assert!(provider.default_model().is_none());
    }

    #[test]
    fn test_configuration_is_memoized() {
        let provider = GeminiProvider::new("key");
        let first = provider.configuration() as *const _;
        provider
            .configuration()
            .write()
            .unwrap()
            .set_temperature(0.1);
        let second = provider.configuration() as *const _;

        assert_eq!(first, second);
        assert_eq!(provider.configuration().read().unwrap().temperature(), 0.1);
    }

    #[test]
    fn test_configuration_seeded_from_defaults() {
        let provider = GeminiProvider::new("key")
            .with_default_model(ChatModel::Gemini1_5Flash)
            .with_generation_defaults(GenerationDefaults {
                temperature: 0.2,
                max_output_tokens: 128,
                top_p: 0.5,
                top_k: 5,
            });

        let config = provider.configuration().read().unwrap();
        assert_eq!(config.chat_model(), Some(ChatModel::Gemini1_5Flash.model_id()));
        assert_eq!(config.max_output_tokens(), 128);
        assert_eq!(config.top_k(), 5);
    }

    #[test]
    fn test_invalid_defaults_fall_back() {
        let provider = GeminiProvider::new("key").with_generation_defaults(GenerationDefaults {
            max_output_tokens: 0,
            ..Default::default()
        });
        assert_eq!(provider.configuration().read().unwrap().max_output_tokens(), 800);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let provider = GeminiProvider::new("super-secret");
        assert!(!format!("{provider:?}").contains("super-secret"));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "hello" }], "role": "model" } }],
                "usageMetadata": {
                    "promptTokenCount": 10,
                    "candidatesTokenCount": 5,
                    "totalTokenCount": 15
                },
                "modelVersion": "gemini-2.0-flash",
                "responseId": "abc123"
            })))
            .mount(&mock_server)
            .await;

        let provider = mock_provider(&mock_server);
        let resp = provider.chat(&ChatMessage::user("Hi")).await.unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.message, "hello");
        assert_eq!(resp.input_tokens, 10);
        assert_eq!(resp.output_tokens, 5);
        assert_eq!(resp.total_tokens, 15);
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.response_id, "abc123");
    }

    #[tokio::test]
    async fn test_chat_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 400, "message": "bad key", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&mock_server)
            .await;

        let provider = mock_provider(&mock_server);
        let resp = provider.chat(&ChatMessage::user("Hi")).await.unwrap();

        assert!(resp.is_failed());
        assert_eq!(resp.message, NO_RESPONSE_MESSAGE);
        assert_eq!(resp.failed_message, "bad key");
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.total_tokens, 0);
    }

    #[tokio::test]
    async fn test_chat_network_error() {
        // Point to a port that's not listening
        let provider = GeminiProvider::new("secret-key")
            .with_api_base("http://127.0.0.1:1")
            .with_default_model(ChatModel::Gemini2_0Flash);

        let resp = provider.chat(&ChatMessage::user("Hello")).await.unwrap();

        assert_eq!(resp.status_code, 0);
        assert!(resp.is_failed());
        assert!(resp.failed_message.contains("Error calling Gemini"));
        assert!(!resp.failed_message.contains("secret-key"));
    }

    #[tokio::test]
    async fn test_chat_sends_history_and_instruction() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(FLASH_PATH))
            .and(body_partial_json(serde_json::json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "What is your name?" }] },
                    { "role": "model", "parts": [{ "text": "Parley." }] },
                    { "role": "user", "parts": [{ "text": "Nice to meet you!" }] }
                ],
                "system_instruction": { "parts": [{ "text": "Be friendly." }] },
                "generationConfig": { "maxOutputTokens": 50 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .mount(&mock_server)
            .await;

        let provider = mock_provider(&mock_server);
        {
            let mut config = provider.configuration().write().unwrap();
            config
                .set_instruction(ChatMessage::instructor("Be friendly."))
                .set_chat_history(ChatHistory::from_messages(vec![
                    ChatMessage::user("What is your name?"),
                    ChatMessage::assistant("Parley."),
                ]))
                .set_max_output_tokens(50)
                .unwrap();
        }

        let resp = provider.chat(&ChatMessage::user("Nice to meet you!")).await.unwrap();

        // If the body matcher fails, wiremock returns 404 → message falls back
        assert_eq!(resp.message, "ok");
    }

    #[tokio::test]
    async fn test_chat_without_model_fails_before_sending() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::new("key").with_api_base(mock_server.uri());
        let err = provider.chat(&ChatMessage::user("Hi")).await.unwrap_err();
        assert_eq!(err, ChatbotError::ModelNotSet);
    }
}
