//! Gemini model catalogs.

use std::fmt;
use std::str::FromStr;

use parley_core::ModelId;

/// Gemini chat models, each carrying its literal API identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChatModel {
    /// Best price-performance; preview rate limits apply.
    Gemini2_5FlashPreview0520,
    /// Thinking model for code, math and long-context analysis; preview rate limits apply.
    Gemini2_5ProPreview,
    /// Native tool use and a 1M token context window.
    Gemini2_0Flash,
    /// 2.0 Flash tuned for cost and latency.
    Gemini2_0FlashLite,
    Gemini1_5Flash,
    /// Small model for lower intelligence tasks.
    Gemini1_5Flash8b,
    Gemini1_5Pro,
    /// Live API model (bidirectional voice/video).
    Gemini2_0FlashLive,
}

impl ChatModel {
    pub const ALL: [ChatModel; 8] = [
        ChatModel::Gemini2_5FlashPreview0520,
        ChatModel::Gemini2_5ProPreview,
        ChatModel::Gemini2_0Flash,
        ChatModel::Gemini2_0FlashLite,
        ChatModel::Gemini1_5Flash,
        ChatModel::Gemini1_5Flash8b,
        ChatModel::Gemini1_5Pro,
        ChatModel::Gemini2_0FlashLive,
    ];

    /// Literal identifier used in request URLs.
    pub const fn api_id(self) -> &'static str {
        match self {
            ChatModel::Gemini2_5FlashPreview0520 => "gemini-2.5-flash-preview-05-20",
            ChatModel::Gemini2_5ProPreview => "gemini-2.5-pro-preview-05-06",
            ChatModel::Gemini2_0Flash => "gemini-2.0-flash",
            ChatModel::Gemini2_0FlashLite => "gemini-2.0-flash-lite",
            ChatModel::Gemini1_5Flash => "gemini-1.5-flash",
            ChatModel::Gemini1_5Flash8b => "gemini-1.5-flash-8b",
            ChatModel::Gemini1_5Pro => "gemini-1.5-pro",
            ChatModel::Gemini2_0FlashLive => "gemini-2.0-flash-live-001",
        }
    }

    pub const fn model_id(self) -> ModelId {
        ModelId::from_static(self.api_id())
    }
}

impl From<ChatModel> for ModelId {
    fn from(model: ChatModel) -> Self {
        model.model_id()
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_id())
    }
}

impl FromStr for ChatModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChatModel::ALL
            .into_iter()
            .find(|m| m.api_id() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// Gemini embedding models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmbeddingModel {
    GeminiEmbeddingExp0307,
    TextEmbedding004,
    Embedding001,
}

impl EmbeddingModel {
    pub const ALL: [EmbeddingModel; 3] = [
        EmbeddingModel::GeminiEmbeddingExp0307,
        EmbeddingModel::TextEmbedding004,
        EmbeddingModel::Embedding001,
    ];

    pub const fn api_id(self) -> &'static str {
        match self {
            EmbeddingModel::GeminiEmbeddingExp0307 => "gemini-embedding-exp-03-07",
            EmbeddingModel::TextEmbedding004 => "text-embedding-004",
            EmbeddingModel::Embedding001 => "embedding-001",
        }
    }

    pub const fn model_id(self) -> ModelId {
        ModelId::from_static(self.api_id())
    }
}

impl From<EmbeddingModel> for ModelId {
    fn from(model: EmbeddingModel) -> Self {
        model.model_id()
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_id())
    }
}

impl FromStr for EmbeddingModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmbeddingModel::ALL
            .into_iter()
            .find(|m| m.api_id() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// A model id that is not in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownModel(pub String);

impl fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown Gemini model '{}'", self.0)
    }
}

impl std::error::Error for UnknownModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_model_api_ids() {
        assert_eq!(ChatModel::Gemini2_5FlashPreview0520.api_id(), "gemini-2.5-flash-preview-05-20");
        assert_eq!(ChatModel::Gemini2_5ProPreview.api_id(), "gemini-2.5-pro-preview-05-06");
        assert_eq!(ChatModel::Gemini2_0Flash.api_id(), "gemini-2.0-flash");
        assert_eq!(ChatModel::Gemini2_0FlashLite.api_id(), "gemini-2.0-flash-lite");
        assert_eq!(ChatModel::Gemini1_5Flash.api_id(), "gemini-1.5-flash");
        assert_eq!(ChatModel::Gemini1_5Flash8b.api_id(), "gemini-1.5-flash-8b");
        assert_eq!(ChatModel::Gemini1_5Pro.api_id(), "gemini-1.5-pro");
        assert_eq!(ChatModel::Gemini2_0FlashLive.api_id(), "gemini-2.0-flash-live-001");
    }

    #[test]
    fn test_embedding_model_api_ids() {
        assert_eq!(EmbeddingModel::GeminiEmbeddingExp0307.api_id(), "gemini-embedding-exp-03-07");
        assert_eq!(EmbeddingModel::TextEmbedding004.api_id(), "text-embedding-004");
        assert_eq!(EmbeddingModel::Embedding001.api_id(), "embedding-001");
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<&str> = ChatModel::ALL.iter().map(|m| m.api_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ChatModel::ALL.len());
    }

    #[test]
    fn test_from_str_round_trip() {
        for model in ChatModel::ALL {
            assert_eq!(model.api_id().parse::<ChatModel>().unwrap(), model);
        }
        for model in EmbeddingModel::ALL {
            assert_eq!(model.to_string().parse::<EmbeddingModel>().unwrap(), model);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "gpt-4o".parse::<ChatModel>().unwrap_err();
        assert_eq!(err, UnknownModel("gpt-4o".to_string()));
        assert!(err.to_string().contains("gpt-4o"));
    }

    #[test]
    fn test_into_model_id() {
        let id: ModelId = ChatModel::Gemini1_5Pro.into();
        assert_eq!(id.as_str(), "gemini-1.5-pro");
    }
}
