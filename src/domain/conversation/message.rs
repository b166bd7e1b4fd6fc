//! Message entity for the chat transcript.
//!
//! Messages are immutable records of user/bot/agent utterances. The
//! transcript is append-only; nothing here allows editing a message.

use crate::domain::foundation::{DomainError, MessageId, Timestamp};
use serde::{Deserialize, Serialize};

/// Author of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Visitor typing into the widget.
    User,
    /// Automated concierge response.
    Bot,
    /// Follow-up attributed to the listing agent.
    Agent,
}

/// An immutable message within a conversation.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `text` is non-empty after trimming (validated at construction)
/// - `timestamp` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    text: String,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sender: Option<String>,
}

impl ChatMessage {
    /// Creates a new message with the given role and text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace only
    pub fn new(role: Role, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation("text", "Message text cannot be empty"));
        }

        Ok(Self {
            id: MessageId::new(),
            role,
            text,
            timestamp: Timestamp::now(),
            sender: None,
        })
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Role::User, text)
    }

    /// Creates a bot message.
    pub fn bot(text: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Role::Bot, text)
    }

    /// Creates an agent message attributed to `sender`.
    pub fn agent(sender: impl Into<String>, text: impl Into<String>) -> Result<Self, DomainError> {
        let mut message = Self::new(Role::Agent, text)?;
        message.sender = Some(sender.into());
        Ok(message)
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Display name of the author, only set for agent messages.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }
}
