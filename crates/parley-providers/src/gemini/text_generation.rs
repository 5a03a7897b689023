//! Gemini `generateContent` request construction and transport.
//!
//! The request body is captured from a `GenerationConfig` up front, so the
//! caller can release the config lock before any network I/O happens.

use serde::Serialize;
use tracing::{debug, error, warn};

use parley_core::{ChatMessage, ChatbotError, GenerationConfig, ModelId, Result};

use super::response::TextGenerationResponse;
use super::roles::vendor_role;

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

/// Request body for `models/{model}:generateContent`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationParams,
    #[serde(rename = "system_instruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
}

/// One turn in `contents`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

/// Sampling parameters, passed through verbatim (already validated).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

fn text_parts(text: &str) -> Vec<Part> {
    vec![Part {
        text: text.to_string(),
    }]
}

// ─────────────────────────────────────────────
// TextGeneration
// ─────────────────────────────────────────────

/// A ready-to-send `generateContent` call.
#[derive(Clone, Debug, PartialEq)]
pub struct TextGeneration {
    model: ModelId,
    request: GenerateContentRequest,
}

impl TextGeneration {
    /// Build the request for `user_message` on top of `config`.
    ///
    /// History turns keep their mapped roles; the new message is always
    /// sent as the `"user"` turn whatever role it carries. Fails with
    /// [`ChatbotError::ModelNotSet`] when no model was selected.
    pub fn new(user_message: &ChatMessage, config: &GenerationConfig) -> Result<Self> {
        let model = config.chat_model().ok_or(ChatbotError::ModelNotSet)?;

        let mut contents: Vec<Content> = config
            .chat_history()
            .iter()
            .map(|message| Content {
                role: vendor_role(message.role()),
                parts: text_parts(message.text()),
            })
            .collect();

        contents.push(Content {
            role: "user",
            parts: text_parts(user_message.text()),
        });

        let request = GenerateContentRequest {
            contents,
            generation_config: GenerationParams {
                temperature: config.temperature(),
                max_output_tokens: config.max_output_tokens(),
                top_p: config.top_p(),
                top_k: config.top_k(),
            },
            system_instruction: config.instruction().map(|instruction| SystemInstruction {
                parts: text_parts(instruction.text()),
            }),
        };

        Ok(TextGeneration { model, request })
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn request(&self) -> &GenerateContentRequest {
        &self.request
    }

    /// Compact JSON body. Non-ASCII text is kept as-is, not `\u` escaped.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.request)
    }

    /// Full endpoint URL including the API key query parameter.
    pub fn request_url(&self, api_base: &str, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            api_base.trim_end_matches('/'),
            self.model,
            api_key
        )
    }

    /// POST the request. Always yields a response; network faults come back
    /// as [`TextGenerationResponse::transport_failure`].
    pub async fn generate(
        &self,
        client: &reqwest::Client,
        api_base: &str,
        api_key: &str,
    ) -> TextGenerationResponse {
        debug!(
            model = %self.model,
            contents = self.request.contents.len(),
            has_instruction = self.request.system_instruction.is_some(),
            "Calling Gemini generateContent"
        );

        let result = client
            .post(self.request_url(api_base, api_key))
            .json(&self.request)
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) => {
                // The URL carries the API key; keep it out of logs and responses.
                let e = e.without_url();
                error!(model = %self.model, error = %e, "HTTP request failed");
                return TextGenerationResponse::transport_failure(format!(
                    "Error calling Gemini: {}",
                    e
                ));
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                let e = e.without_url();
                error!(model = %self.model, status = %status, error = %e, "Failed to read response body");
                return TextGenerationResponse::new(
                    status.as_u16(),
                    serde_json::json!({
                        "error": { "message": format!("Error reading Gemini response: {}", e) }
                    }),
                );
            }
        };

        let resp = TextGenerationResponse::from_bytes(status.as_u16(), &bytes);
        if resp.is_failed() {
            warn!(
                model = %self.model,
                status = %status,
                error = %resp.failed_message(),
                "Gemini API error"
            );
        } else {
            debug!(
                model = %self.model,
                total_tokens = resp.total_tokens(),
                "Gemini response received"
            );
        }
        resp
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
