//! Listing context supplied by the hosting page.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PropertyId;

/// Agent responsible for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl AgentProfile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// "First Last", or whichever half is present.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// The listing being discussed, when the chat is opened from a listing page.
///
/// Read-only for the engine: it is captured at session start and copied
/// into every state snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyContext {
    pub id: PropertyId,
    pub title: String,
    #[serde(default)]
    pub agent: Option<AgentProfile>,
}

impl PropertyContext {
    pub fn new(id: PropertyId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            agent: None,
        }
    }

    pub fn with_agent(mut self, agent: AgentProfile) -> Self {
        self.agent = Some(agent);
        self
    }
}
