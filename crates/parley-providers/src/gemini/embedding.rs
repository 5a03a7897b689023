//! Gemini `embedContent` support.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::models::EmbeddingModel;
use super::provider::GeminiProvider;
use super::text_generation::Part;
use crate::traits::EmbeddingProvider;

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    /// `models/{id}`
    model: String,
    content: EmbedContent,
}

#[derive(Debug, Serialize)]
struct EmbedContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    #[serde(default)]
    values: Vec<f32>,
}

fn embed_url(api_base: &str, model: EmbeddingModel, api_key: &str) -> String {
    format!(
        "{}/v1beta/models/{}:embedContent?key={}",
        api_base.trim_end_matches('/'),
        model,
        api_key
    )
}

#[async_trait]
impl EmbeddingProvider for GeminiProvider {
    async fn embed_content(&self, text: &str) -> Vec<f32> {
        let model = self.embedding_model;
        let request = EmbedContentRequest {
            model: format!("models/{model}"),
            content: EmbedContent {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        };

        debug!(model = %model, chars = text.chars().count(), "Calling Gemini embedContent");

        let response = match self
            .client
            .post(embed_url(&self.api_base, model, &self.api_key))
            .json(&request)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let e = e.without_url();
                error!(model = %model, error = %e, "Embedding request failed");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model = %model, status = %status, body = %body, "Gemini embedding error");
            return Vec::new();
        }

        match response.json::<EmbedContentResponse>().await {
            Ok(parsed) => parsed.embedding.values,
            Err(e) => {
                let e = e.without_url();
                warn!(model = %model, error = %e, "Failed to parse embedding response");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_embed_url() {
        assert_eq!(
            embed_url("http://localhost:1234/", EmbeddingModel::TextEmbedding004, "k"),
            "http://localhost:1234/v1beta/models/text-embedding-004:embedContent?key=k"
        );
    }

    #[tokio::test]
    async fn test_embed_content_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/embedding-001:embedContent"))
            .and(query_param("key", "test-key"))
            .and(body_json(serde_json::json!({
                "model": "models/embedding-001",
                "content": { "parts": [{ "text": "hello world" }] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": { "values": [0.25, -0.5, 1.0] }
            })))
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::new("test-key")
            .with_api_base(mock_server.uri())
            .with_embedding_model(EmbeddingModel::Embedding001);

        let values = provider.embed_content("hello world").await;
        assert_eq!(values, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_embed_content_error_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": { "message": "forbidden" }
            })))
            .mount(&mock_server)
            .await;

        let provider = GeminiProvider::new("test-key").with_api_base(mock_server.uri());
        assert!(provider.embed_content("hello").await.is_empty());
    }

    #[tokio::test]
    async fn test_embed_content_network_error_is_empty() {
        let provider = GeminiProvider::new("test-key").with_api_base("http://127.0.0.1:1");
        assert!(provider.embed_content("hello").await.is_empty());
    }
}
