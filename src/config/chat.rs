//! Chat session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::ChatSettings;
use crate::domain::conversation::{looks_like_email, FlowConfig};

/// Chat behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Typing indicator delay before each bot reply, in milliseconds
    #[serde(default = "default_typing_delay")]
    pub typing_delay_ms: u64,

    /// Delay before the listing agent's follow-up, in milliseconds
    #[serde(default = "default_agent_followup_delay")]
    pub agent_followup_delay_ms: u64,

    /// Ask for an email between name and phone
    #[serde(default)]
    pub request_email: bool,

    /// Sent to the listing endpoint when the visitor gave no email
    #[serde(default = "default_placeholder_email")]
    pub placeholder_email: String,
}

impl ChatConfig {
    pub fn settings(&self) -> ChatSettings {
        ChatSettings {
            typing_delay: Duration::from_millis(self.typing_delay_ms),
            agent_followup_delay: Duration::from_millis(self.agent_followup_delay_ms),
            flow: FlowConfig {
                request_email: self.request_email,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !looks_like_email(&self.placeholder_email) {
            return Err(ValidationError::InvalidPlaceholderEmail);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay(),
            agent_followup_delay_ms: default_agent_followup_delay(),
            request_email: false,
            placeholder_email: default_placeholder_email(),
        }
    }
}

fn default_typing_delay() -> u64 {
    1000
}

fn default_agent_followup_delay() -> u64 {
    2000
}

fn default_placeholder_email() -> String {
    "not-provided@chat.local".to_string()
}
