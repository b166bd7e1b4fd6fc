//! Lead submission payloads built from a completed conversation.

use serde::{Deserialize, Serialize};

use super::state::ConversationState;
use crate::domain::foundation::PropertyId;

/// Inquiry about a specific listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInquiry {
    pub property_id: PropertyId,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Inquiry not tied to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralInquiry {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedroom_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_interest: Option<String>,
    pub message: String,
}

/// What gets handed to the inquiry API once a conversation completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeadSubmission {
    Property(PropertyInquiry),
    General(GeneralInquiry),
}

impl LeadSubmission {
    /// Builds the payload for a terminal state.
    ///
    /// Returns `None` unless the state is terminal with name and phone set.
    /// `placeholder_email` stands in for a missing email on listing inquiries,
    /// whose endpoint requires one.
    pub fn from_state(state: &ConversationState, placeholder_email: &str) -> Option<Self> {
        if !state.is_terminal() {
            return None;
        }
        let name = state.user_name()?.to_string();
        let phone = state.user_phone()?.to_string();

        let submission = match state.property_context() {
            Some(ctx) => {
                let interest = state.property_interest().unwrap_or(&ctx.title);
                LeadSubmission::Property(PropertyInquiry {
                    property_id: ctx.id.clone(),
                    name,
                    email: state
                        .user_email()
                        .unwrap_or(placeholder_email)
                        .to_string(),
                    message: summary(state, &phone, Some(interest)),
                })
            }
            None => LeadSubmission::General(GeneralInquiry {
                message: summary(state, &phone, state.property_interest()),
                name,
                phone,
                email: state.user_email().map(str::to_string),
                property_type: state.property_type().map(str::to_string),
                bedroom_count: state.bedroom_count().map(str::to_string),
                property_interest: state.property_interest().map(str::to_string),
            }),
        };
        Some(submission)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LeadSubmission::Property(_) => "property",
            LeadSubmission::General(_) => "general",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LeadSubmission::Property(p) => &p.message,
            LeadSubmission::General(g) => &g.message,
        }
    }
}

fn summary(state: &ConversationState, phone: &str, interest: Option<&str>) -> String {
    let mut lines = vec![
        format!("Chat assistant inquiry from {}.", state.user_name().unwrap_or("a visitor")),
        format!("Phone: {}", phone.trim()),
    ];
    if let Some(email) = state.user_email() {
        lines.push(format!("Email: {}", email.trim()));
    }
    if let Some(interest) = interest {
        lines.push(format!("Interested in: {}", interest));
    }
    if let Some(kind) = state.property_type() {
        lines.push(format!("Property type: {}", kind));
    }
    if let Some(bedrooms) = state.bedroom_count() {
        lines.push(format!("Bedrooms: {}", bedrooms));
    }
    lines.join("\n")
}
