//! Closed set of user intents recognised by the concierge.

use serde::{Deserialize, Serialize};

/// Purpose of a single user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Greeting,
    AgentContact,
    BuyIntent,
    SellIntent,
    ViewListings,
    PropertyType,
    BedroomCount,
    LocationInquiry,
    PropertySearch,
    NameProvided,
    PhoneProvided,
    EmailProvided,
    Unknown,
}

impl Intent {
    /// Intents that open contact-info collection when it is not running yet.
    pub const LEAD_OPENERS: [Intent; 8] = [
        Intent::AgentContact,
        Intent::BuyIntent,
        Intent::SellIntent,
        Intent::ViewListings,
        Intent::BedroomCount,
        Intent::LocationInquiry,
        Intent::PropertyType,
        Intent::PropertySearch,
    ];

    pub fn opens_lead(&self) -> bool {
        Self::LEAD_OPENERS.contains(self)
    }

    /// True for intents that carry a contact slot value.
    pub fn provides_contact(&self) -> bool {
        matches!(
            self,
            Intent::NameProvided | Intent::PhoneProvided | Intent::EmailProvided
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "GREETING",
            Intent::AgentContact => "AGENT_CONTACT",
            Intent::BuyIntent => "BUY_INTENT",
            Intent::SellIntent => "SELL_INTENT",
            Intent::ViewListings => "VIEW_LISTINGS",
            Intent::PropertyType => "PROPERTY_TYPE",
            Intent::BedroomCount => "BEDROOM_COUNT",
            Intent::LocationInquiry => "LOCATION_INQUIRY",
            Intent::PropertySearch => "PROPERTY_SEARCH",
            Intent::NameProvided => "NAME_PROVIDED",
            Intent::PhoneProvided => "PHONE_PROVIDED",
            Intent::EmailProvided => "EMAIL_PROVIDED",
            Intent::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Intent::BuyIntent).unwrap(), "\"BUY_INTENT\"");
        assert_eq!(
            serde_json::to_string(&Intent::LocationInquiry).unwrap(),
            "\"LOCATION_INQUIRY\""
        );
    }

    #[test]
    fn display_matches_serde_name() {
        for intent in Intent::LEAD_OPENERS {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json.trim_matches('"'), intent.to_string());
        }
    }

    #[test]
    fn contact_intents_do_not_open_leads() {
        assert!(!Intent::NameProvided.opens_lead());
        assert!(!Intent::PhoneProvided.opens_lead());
        assert!(!Intent::EmailProvided.opens_lead());
        assert!(!Intent::Greeting.opens_lead());
        assert!(!Intent::Unknown.opens_lead());
    }

    #[test]
    fn contact_intents_provide_contact() {
        assert!(Intent::NameProvided.provides_contact());
        assert!(Intent::PhoneProvided.provides_contact());
        assert!(Intent::EmailProvided.provides_contact());
        assert!(!Intent::AgentContact.provides_contact());
    }

    #[test]
    fn lead_openers_open_leads() {
        assert!(Intent::BedroomCount.opens_lead());
        assert!(Intent::AgentContact.opens_lead());
    }
}
