//! Lifecycle notifications emitted around each chat turn.

use crate::types::ChatResponse;
use chrono::{DateTime, Utc};

/// Emitted after input validation, before the provider is called.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageSent {
    /// Text exactly as the caller passed it.
    pub text: String,
    /// Caller-supplied id threaded through the turn (e.g. a user id).
    pub correlation_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl MessageSent {
    pub fn new(text: impl Into<String>, correlation_id: Option<String>) -> Self {
        MessageSent {
            text: text.into(),
            correlation_id,
            timestamp: Utc::now(),
        }
    }
}

/// Emitted once the provider returned a normalized response.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseReceived {
    /// The original input text of the turn.
    pub text: String,
    pub response: ChatResponse,
    pub correlation_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ResponseReceived {
    pub fn new(
        text: impl Into<String>,
        response: ChatResponse,
        correlation_id: Option<String>,
    ) -> Self {
        ResponseReceived {
            text: text.into(),
            response,
            correlation_id,
            timestamp: Utc::now(),
        }
    }
}

/// Any lifecycle notification.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatEvent {
    MessageSent(MessageSent),
    ResponseReceived(ResponseReceived),
}

impl ChatEvent {
    /// Short name for logs (`"message_sent"`, `"response_received"`).
    pub fn kind(&self) -> &'static str {
        match self {
            ChatEvent::MessageSent(_) => "message_sent",
            ChatEvent::ResponseReceived(_) => "response_received",
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            ChatEvent::MessageSent(e) => e.correlation_id.as_deref(),
            ChatEvent::ResponseReceived(e) => e.correlation_id.as_deref(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ChatEvent::MessageSent(e) => &e.text,
            ChatEvent::ResponseReceived(e) => &e.text,
        }
    }
}

impl From<MessageSent> for ChatEvent {
    fn from(event: MessageSent) -> Self {
        ChatEvent::MessageSent(event)
    }
}

impl From<ResponseReceived> for ChatEvent {
    fn from(event: ResponseReceived) -> Self {
        ChatEvent::ResponseReceived(event)
    }
}
