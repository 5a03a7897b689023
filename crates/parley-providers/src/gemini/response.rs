//! Normalization of Gemini `generateContent` responses.
//!
//! Every accessor has an explicit default, so extraction never fails on a
//! missing or oddly-typed field.

use parley_core::ChatResponse;
use serde_json::Value;

pub const NO_RESPONSE_MESSAGE: &str = "No response from AI service";
pub const NO_ERROR_MESSAGE: &str = "No error message provided";

/// Raw HTTP outcome of one `generateContent` call.
#[derive(Clone, Debug, PartialEq)]
pub struct TextGenerationResponse {
    status: u16,
    body: Value,
}

impl TextGenerationResponse {
    pub fn new(status: u16, body: Value) -> Self {
        TextGenerationResponse { status, body }
    }

    /// Wrap a raw body. Anything that is not JSON is treated as `null`.
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
        let body = serde_json::from_slice(bytes).unwrap_or(Value::Null);
        Self::new(status, body)
    }

    /// A request that never got an HTTP response. Reported with status `0`
    /// and the fault description as the vendor error message.
    pub fn transport_failure(reason: impl std::fmt::Display) -> Self {
        Self::new(
            0,
            serde_json::json!({ "error": { "message": reason.to_string() } }),
        )
    }

    /// True iff the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_failed(&self) -> bool {
        !self.is_success()
    }

    /// `candidates[0].content.parts[0].text`
    pub fn message(&self) -> String {
        self.str_at("/candidates/0/content/parts/0/text")
            .unwrap_or(NO_RESPONSE_MESSAGE)
            .to_string()
    }

    /// `error.message`
    pub fn failed_message(&self) -> String {
        self.str_at("/error/message")
            .unwrap_or(NO_ERROR_MESSAGE)
            .to_string()
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn input_tokens(&self) -> u64 {
        self.count_at("/usageMetadata/promptTokenCount")
    }

    pub fn output_tokens(&self) -> u64 {
        self.count_at("/usageMetadata/candidatesTokenCount")
    }

    pub fn total_tokens(&self) -> u64 {
        self.count_at("/usageMetadata/totalTokenCount")
    }

    pub fn response_id(&self) -> String {
        self.str_at("/responseId").unwrap_or_default().to_string()
    }

    pub fn model_version(&self) -> String {
        self.str_at("/modelVersion").unwrap_or_default().to_string()
    }

    /// The raw decoded body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_chat_response(self) -> ChatResponse {
        ChatResponse::from(&self)
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }

    fn count_at(&self, pointer: &str) -> u64 {
        self.body
            .pointer(pointer)
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

impl From<&TextGenerationResponse> for ChatResponse {
    fn from(resp: &TextGenerationResponse) -> Self {
        ChatResponse {
            message: resp.message(),
            failed_message: resp.failed_message(),
            status_code: resp.status_code(),
            input_tokens: resp.input_tokens(),
            output_tokens: resp.output_tokens(),
            total_tokens: resp.total_tokens(),
            response_id: resp.response_id(),
            model_version: resp.model_version(),
        }
    }
}

impl From<TextGenerationResponse> for ChatResponse {
    fn from(resp: TextGenerationResponse) -> Self {
        ChatResponse::from(&resp)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
