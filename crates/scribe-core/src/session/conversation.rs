//! Conversation types for session management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user
    User,
    /// Message from the assistant
    Assistant,
    /// System message
    System,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Message role
    pub role: MessageRole,
    /// Message content
    pub content: String,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    /// Create a new message
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// An ordered conversation history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Messages in chronological order
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message
    pub fn add_user(&mut self, content: impl Into<String>) {
        self.messages
            .push(ConversationMessage::new(MessageRole::User, content));
    }

    /// Append an assistant message
    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.messages
            .push(ConversationMessage::new(MessageRole::Assistant, content));
    }

    /// Append a system message
    pub fn add_system(&mut self, content: impl Into<String>) {
        self.messages
            .push(ConversationMessage::new(MessageRole::System, content));
    }

    /// All messages in order
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop all messages
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
