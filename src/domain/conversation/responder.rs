//! Bot response rendering.
//!
//! A pure template lookup keyed on `(intent, stage, awaiting field)`.
//! Templates may interpolate slots from the state they are given, but hold
//! no counters or randomness, so identical inputs render identical text.

use super::intent::Intent;
use super::property::PropertyContext;
use super::stage::ConversationStage;
use super::state::{AwaitingField, ConversationState};

const FALLBACK_AGENT: &str = "one of our agents";

/// Renders the concierge's side of the dialogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseGenerator;

impl ResponseGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Opening message shown when a session starts.
    pub fn welcome(&self, property: Option<&PropertyContext>) -> String {
        match property {
            Some(ctx) => format!(
                "Hi there! I'm the virtual concierge for {}. Are you interested in buying, \
                 would you like to see similar listings, or shall I put you in touch with {}?",
                ctx.title,
                agent_name(Some(ctx))
            ),
            None => "Hi there! I'm your virtual property concierge. Are you looking to buy, \
                     sell, or browse our listings?"
                .to_string(),
        }
    }

    /// Renders the reply for one turn.
    ///
    /// `state` is the state after the turn's transition. The template is
    /// chosen by intent, stage and awaiting field alone; the visitor's text
    /// never selects it.
    pub fn render(
        &self,
        intent: Intent,
        _raw_text: &str,
        state: &ConversationState,
        property: Option<&PropertyContext>,
    ) -> String {
        match (state.stage(), state.awaiting_field()) {
            (ConversationStage::InquirySubmitted, _) => submitted(intent, state, property),
            (_, Some(AwaitingField::Name)) => ask_name(intent, state, property),
            (_, Some(AwaitingField::Email)) => ask_email(intent, state),
            (_, Some(AwaitingField::Phone)) => ask_phone(intent, state),
            (_, None) => greeting(intent, property),
        }
    }

    /// Follow-up from the listing agent after a submission.
    ///
    /// Returns `(sender, text)`, or `None` when there is no agent or nothing
    /// has been submitted yet.
    pub fn agent_follow_up(&self, state: &ConversationState) -> Option<(String, String)> {
        if !state.is_terminal() {
            return None;
        }
        let ctx = state.property_context()?;
        let agent = ctx.agent.as_ref()?;
        let sender = agent.full_name();
        let text = format!(
            "Hi {}, this is {}. I've received your inquiry about {} and will call you at {} shortly.",
            state.user_name().unwrap_or("there"),
            sender,
            ctx.title,
            state.user_phone().map(str::trim).unwrap_or("the number you gave"),
        );
        Some((sender, text))
    }
}

fn agent_name(property: Option<&PropertyContext>) -> String {
    property
        .and_then(|ctx| ctx.agent.as_ref())
        .map(|agent| agent.full_name())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_AGENT.to_string())
}

fn greeting(intent: Intent, property: Option<&PropertyContext>) -> String {
    match intent {
        Intent::Greeting => match property {
            Some(ctx) => format!(
                "Hello! Welcome. Would you like to know more about {}? I can arrange a call \
                 with {} or help you buy.",
                ctx.title,
                agent_name(property)
            ),
            None => "Hello! Welcome. I can help you buy, sell, or explore listings. \
                     What are you looking for today?"
                .to_string(),
        },
        i if i.provides_contact() => {
            "Thanks! Before I take your details, could you tell me what you're looking for: \
             buying, selling, or browsing listings?"
                .to_string()
        }
        _ => "I'm not sure I understood. I can help you buy, sell, or view listings, or \
              connect you with an agent. What would you like to do?"
            .to_string(),
    }
}

fn ask_name(intent: Intent, state: &ConversationState, property: Option<&PropertyContext>) -> String {
    let lead_in = match intent {
        Intent::AgentContact => format!("I'd be happy to connect you with {}.", agent_name(property)),
        Intent::BuyIntent => match property {
            Some(ctx) => format!("Great choice! {} is a wonderful property.", ctx.title),
            None => "Wonderful! I'd love to help you find a property to buy.".to_string(),
        },
        Intent::SellIntent => "We'd be glad to help you sell your property.".to_string(),
        Intent::ViewListings => "I can have an agent send you listings that match.".to_string(),
        Intent::BedroomCount => match state.bedroom_count() {
            Some("0") => "Got it, a studio.".to_string(),
            Some(n) if n.chars().all(|c| c.is_ascii_digit()) => format!("Got it, {} bedrooms.", n),
            _ => "Got it.".to_string(),
        },
        Intent::PropertyType => match state.property_type() {
            Some(kind) => format!("{}, noted.", capitalize(kind)),
            None => "Noted.".to_string(),
        },
        Intent::LocationInquiry => "Our agents know the area very well.".to_string(),
        Intent::PropertySearch => "I can help you with your search.".to_string(),
        _ => return "Could you please tell me your name?".to_string(),
    };
    format!("{} May I have your name, please?", lead_in)
}

fn ask_email(intent: Intent, state: &ConversationState) -> String {
    match (intent, state.user_name()) {
        (Intent::NameProvided, Some(name)) => {
            format!("Nice to meet you, {}! What's your email address?", name)
        }
        _ => "Could you share your email address?".to_string(),
    }
}

fn ask_phone(intent: Intent, state: &ConversationState) -> String {
    match (intent, state.user_name()) {
        (Intent::NameProvided, Some(name)) => format!(
            "Nice to meet you, {}! What's the best phone number to reach you?",
            name
        ),
        (Intent::EmailProvided, _) => {
            "Thanks! And what's the best phone number to reach you?".to_string()
        }
        _ => "Could you share a phone number so our agent can reach you?".to_string(),
    }
}

fn submitted(intent: Intent, state: &ConversationState, property: Option<&PropertyContext>) -> String {
    let name = state.user_name().unwrap_or("there");
    match intent {
        Intent::PhoneProvided => {
            let about = property
                .map(|ctx| format!(" about {}", ctx.title))
                .unwrap_or_default();
            format!(
                "Thank you, {}! {} will call you at {}{} shortly.",
                name,
                capitalize(&agent_name(property)),
                state.user_phone().map(str::trim).unwrap_or("your number"),
                about
            )
        }
        _ => format!(
            "Thanks, {}. Your inquiry has already been sent and our team will be in touch soon.",
            name
        ),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
