//! Listing context for sessions started from a property page

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::conversation::{AgentProfile, PropertyContext};
use crate::domain::foundation::PropertyId;

/// The listing a session is about, with its agent if one is assigned
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyConfig {
    pub id: String,
    pub title: String,
    pub agent_first_name: Option<String>,
    pub agent_last_name: Option<String>,
    pub agent_avatar: Option<String>,
}

impl PropertyConfig {
    pub fn context(&self) -> Result<PropertyContext, ValidationError> {
        let id = PropertyId::new(&self.id)
            .map_err(|_| ValidationError::MissingRequired("PROPERTY__ID"))?;
        let context = PropertyContext::new(id, self.title.trim());

        Ok(match (&self.agent_first_name, &self.agent_last_name) {
            (Some(first), Some(last)) => {
                let agent = AgentProfile::new(first.trim(), last.trim());
                let agent = match &self.agent_avatar {
                    Some(avatar) => agent.with_avatar(avatar.as_str()),
                    None => agent,
                };
                context.with_agent(agent)
            }
            _ => context,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PROPERTY__TITLE"));
        }
        self.context().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property() -> PropertyConfig {
        PropertyConfig {
            id: "42".to_string(),
            title: "Marina Tower".to_string(),
            agent_first_name: Some("Sara".to_string()),
            agent_last_name: Some("Khan".to_string()),
            agent_avatar: None,
        }
    }

    #[test]
    fn test_context_with_agent() {
        let ctx = property().context().unwrap();
        assert_eq!(ctx.id.as_str(), "42");
        assert_eq!(ctx.title, "Marina Tower");
        assert_eq!(ctx.agent.map(|a| a.full_name()).as_deref(), Some("Sara Khan"));
    }

    #[test]
    fn test_partial_agent_is_dropped() {
        let cfg = PropertyConfig {
            agent_last_name: None,
            ..property()
        };
        assert!(cfg.context().unwrap().agent.is_none());
    }

    #[test]
    fn test_blank_id_rejected() {
        let cfg = PropertyConfig {
            id: "  ".to_string(),
            ..property()
        };
        assert_eq!(cfg.validate(), Err(ValidationError::MissingRequired("PROPERTY__ID")));
    }
}
