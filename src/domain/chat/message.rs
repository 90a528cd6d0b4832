//! Chat messages held by the conversation client.
//!
//! Messages are immutable once created. The client keeps them in an
//! append-only list; nothing in this crate mutates a message after it has
//! been pushed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who a chat message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Text typed by the person using the chat.
    User,
    /// Reply from the assistant, or a locally generated notice shown in its place.
    Assistant,
}

/// A single entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    role: ChatRole,
    content: String,
    timestamp: Timestamp,
    #[serde(default)]
    is_error: bool,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Timestamp::now(),
            is_error: false,
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    /// Creates an assistant-role message flagged as an error notice.
    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(content)
        }
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}
