//! Conversation state machine.
//!
//! A pure transition function from `(state, intent, extracted value)` to the
//! next state. Guards are evaluated top to bottom and the first that applies
//! decides the transition; anything unmatched leaves the state unchanged.

use super::extractor::ExtractedValue;
use super::intent::Intent;
use super::state::{AwaitingField, ConversationState};

/// Shape of the contact-collection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowConfig {
    /// Ask for an email address between name and phone.
    pub request_email: bool,
}

impl FlowConfig {
    /// The field solicited right after the name.
    pub fn field_after_name(&self) -> AwaitingField {
        if self.request_email {
            AwaitingField::Email
        } else {
            AwaitingField::Phone
        }
    }
}

/// Computes the next conversation state for a classified turn.
#[derive(Debug, Clone, Default)]
pub struct ConversationStateMachine {
    config: FlowConfig,
}

impl ConversationStateMachine {
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> FlowConfig {
        self.config
    }

    /// Returns the state after applying one turn.
    pub fn transition(
        &self,
        state: &ConversationState,
        intent: Intent,
        extracted: Option<&ExtractedValue>,
    ) -> ConversationState {
        let mut next = state.clone();

        if state.is_terminal() {
            return next;
        }

        let collecting = state.is_collecting_user_info();

        if intent.opens_lead() && !collecting {
            next.begin_collecting();
            if intent == Intent::BuyIntent {
                if let Some(ctx) = state.property_context() {
                    next.set_property_interest(ctx.title.clone());
                }
            }
            commit_context_slot(&mut next, extracted);
            return next;
        }

        match (intent, extracted) {
            (Intent::NameProvided, Some(ExtractedValue::Name(name)))
                if collecting
                    && state.awaiting_field() == Some(AwaitingField::Name)
                    && state.user_name().is_none() =>
            {
                next.record_name(name);
                next.await_field(Some(self.config.field_after_name()));
            }
            (Intent::EmailProvided, Some(ExtractedValue::Email(email)))
                if collecting
                    && state.awaiting_field() == Some(AwaitingField::Email)
                    && state.user_name().is_some()
                    && state.user_email().is_none() =>
            {
                next.record_email(email);
                next.await_field(Some(AwaitingField::Phone));
            }
            (Intent::PhoneProvided, Some(ExtractedValue::Phone(phone)))
                if collecting && state.user_name().is_some() && state.user_phone().is_none() =>
            {
                next.record_phone(phone);
                next.submit_inquiry();
            }
            (Intent::BedroomCount | Intent::PropertyType, value) if collecting => {
                commit_context_slot(&mut next, value);
            }
            _ => {}
        }

        next
    }
}

fn commit_context_slot(state: &mut ConversationState, extracted: Option<&ExtractedValue>) {
    match extracted {
        Some(ExtractedValue::Bedrooms(count)) => state.set_bedroom_count(count.clone()),
        Some(ExtractedValue::PropertyType(kind)) => state.set_property_type(kind.clone()),
        _ => {}
    }
}
