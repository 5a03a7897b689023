//! Core types for Parley: chat messages, roles, history, and the normalized
//! response every provider returns.
//!
//! Provider adapters translate these into their own wire formats; nothing in
//! here knows about a specific vendor.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────
// Roles
// ─────────────────────────────────────────────

/// Who authored a chat message.
///
/// Unknown role tags never fail: they coerce to [`Role::User`], both when
/// parsed through [`Role::from_tag`] and when deserialized from JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    /// Input typed by the person chatting.
    #[default]
    User,
    /// Output previously produced by the model.
    Assistant,
    /// Instruction turn (system prompt style).
    Instructor,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 3] = [Role::User, Role::Assistant, Role::Instructor];

    /// Parse a role tag, falling back to `User` for anything unrecognized.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "instructor" => Role::Instructor,
            _ => Role::User,
        }
    }

    /// The canonical tag (`"user"`, `"assistant"`, `"instructor"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Instructor => "instructor",
        }
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        Role::from_tag(&tag)
    }
}

impl From<&str> for Role {
    fn from(tag: &str) -> Self {
        Role::from_tag(tag)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// ChatMessage
// ─────────────────────────────────────────────

/// A single chat turn: text plus the role that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    text: String,
    #[serde(default)]
    role: Role,
}

impl ChatMessage {
    /// Create a message with an explicit role.
    pub fn new(text: impl Into<String>, role: Role) -> Self {
        ChatMessage {
            text: text.into(),
            role,
        }
    }

    /// Create a message from a free-form role tag. Unknown tags become `User`.
    pub fn with_role_tag(text: impl Into<String>, tag: &str) -> Self {
        Self::new(text, Role::from_tag(tag))
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Role::User)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Role::Assistant)
    }

    /// Create an instructor (system prompt) message.
    pub fn instructor(text: impl Into<String>) -> Self {
        Self::new(text, Role::Instructor)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn set_role(&mut self, role: Role) -> &mut Self {
        self.role = role;
        self
    }

    /// Set the role from a tag, coercing unknown tags to `User`.
    pub fn set_role_tag(&mut self, tag: &str) -> &mut Self {
        self.role = Role::from_tag(tag);
        self
    }
}

/// Marker error for values that are not chat messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotAMessage;

impl TryFrom<Option<ChatMessage>> for ChatMessage {
    type Error = NotAMessage;

    fn try_from(value: Option<ChatMessage>) -> Result<Self, Self::Error> {
        value.ok_or(NotAMessage)
    }
}

impl TryFrom<serde_json::Value> for ChatMessage {
    type Error = NotAMessage;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        if !value.is_object() {
            return Err(NotAMessage);
        }
        serde_json::from_value(value).map_err(|_| NotAMessage)
    }
}

// ─────────────────────────────────────────────
// ChatHistory
// ─────────────────────────────────────────────

/// Ordered, append-only record of prior turns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history pre-seeded with `messages`, dropping anything that
    /// is not a chat message.
    pub fn from_messages<I, M>(messages: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: TryInto<ChatMessage>,
    {
        let mut history = Self::new();
        history.add_messages(messages);
        history
    }

    /// Append one message.
    pub fn add_message(&mut self, message: ChatMessage) -> &mut Self {
        self.messages.push(message);
        self
    }

    /// Append many messages. Items that do not convert into a
    /// [`ChatMessage`] (e.g. `None`, JSON `null`, a JSON string) are skipped.
    pub fn add_messages<I, M>(&mut self, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: TryInto<ChatMessage>,
    {
        self.messages
            .extend(messages.into_iter().filter_map(|m| m.try_into().ok()));
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a ChatHistory {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl Extend<ChatMessage> for ChatHistory {
    fn extend<T: IntoIterator<Item = ChatMessage>>(&mut self, iter: T) {
        self.messages.extend(iter);
    }
}

impl FromIterator<ChatMessage> for ChatHistory {
    fn from_iter<T: IntoIterator<Item = ChatMessage>>(iter: T) -> Self {
        ChatHistory {
            messages: iter.into_iter().collect(),
        }
    }
}

// ─────────────────────────────────────────────
// Model identifiers
// ─────────────────────────────────────────────

/// Wire identifier of a chat or embedding model.
///
/// Only constructible from a `&'static str`, so identifiers come from the
/// vendor model catalogs rather than from arbitrary runtime strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelId(&'static str);

impl ModelId {
    pub const fn from_static(id: &'static str) -> Self {
        ModelId(id)
    }

    /// The literal API identifier (e.g. `"gemini-2.0-flash"`).
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ─────────────────────────────────────────────
// Normalized response
// ─────────────────────────────────────────────

/// Provider-independent result of one chat turn.
///
/// Transport and vendor failures are reported through this type rather
/// than as errors: check [`ChatResponse::is_success`] and
/// [`ChatResponse::failed_message`]. A `status_code` of `0` means the
/// request never got an HTTP response (connection refused, DNS, timeout).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Generated text, or a fallback notice when there is none.
    pub message: String,
    /// Vendor error description, or a fallback notice when there is none.
    pub failed_message: String,
    pub status_code: u16,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub response_id: String,
    pub model_version: String,
}

impl ChatResponse {
    /// True iff the HTTP status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_failed(&self) -> bool {
        !self.is_success()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn failed_message(&self) -> &str {
        &self.failed_message
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
