//! Conversation state snapshot.
//!
//! Holds the stage, the collection gate and every slot gathered so far.
//! Contact slots are write-once; the mutators below refuse to overwrite
//! them, which is what keeps a captured name or phone stable for the rest
//! of the conversation.

use serde::{Deserialize, Serialize};

use super::property::PropertyContext;
use super::stage::ConversationStage;
use crate::domain::foundation::StateMachine;

/// The contact slot the engine expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwaitingField {
    Name,
    Email,
    Phone,
}

impl AwaitingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// Snapshot of one conversation.
///
/// # Invariants
///
/// - `stage` only moves forward (see [`ConversationStage`])
/// - at most one field is awaited, and only while collecting
/// - `user_name`, `user_phone`, `user_email` are set at most once
/// - nothing changes after `stage` becomes terminal
/// - `property_context` is never modified after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConversationState {
    stage: ConversationStage,
    collecting_user_info: bool,
    awaiting_field: Option<AwaitingField>,
    user_name: Option<String>,
    user_phone: Option<String>,
    user_email: Option<String>,
    property_interest: Option<String>,
    property_type: Option<String>,
    bedroom_count: Option<String>,
    property_context: Option<PropertyContext>,
}

impl ConversationState {
    /// Fresh state for a newly mounted session.
    pub fn new(property_context: Option<PropertyContext>) -> Self {
        Self {
            property_context,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> ConversationStage {
        self.stage
    }

    pub fn is_collecting_user_info(&self) -> bool {
        self.collecting_user_info
    }

    pub fn awaiting_field(&self) -> Option<AwaitingField> {
        self.awaiting_field
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn user_phone(&self) -> Option<&str> {
        self.user_phone.as_deref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn property_interest(&self) -> Option<&str> {
        self.property_interest.as_deref()
    }

    pub fn property_type(&self) -> Option<&str> {
        self.property_type.as_deref()
    }

    pub fn bedroom_count(&self) -> Option<&str> {
        self.bedroom_count.as_deref()
    }

    pub fn property_context(&self) -> Option<&PropertyContext> {
        self.property_context.as_ref()
    }

    /// True once the inquiry has been handed off.
    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }

    /// True when `self` is the first terminal state after `previous`.
    ///
    /// This is the single trigger for lead submission.
    pub fn entered_terminal_from(&self, previous: &ConversationState) -> bool {
        self.is_terminal() && !previous.is_terminal()
    }

    // ---- mutators used by the state machine ----

    pub(super) fn begin_collecting(&mut self) {
        self.stage = self.stage.advance_to(ConversationStage::CollectingInfo);
        self.collecting_user_info = true;
        self.awaiting_field = Some(AwaitingField::Name);
    }

    pub(super) fn await_field(&mut self, field: Option<AwaitingField>) {
        self.awaiting_field = field;
    }

    pub(super) fn record_name(&mut self, name: &str) -> bool {
        write_once(&mut self.user_name, name)
    }

    pub(super) fn record_email(&mut self, email: &str) -> bool {
        write_once(&mut self.user_email, email)
    }

    pub(super) fn record_phone(&mut self, phone: &str) -> bool {
        write_once(&mut self.user_phone, phone)
    }

    pub(super) fn submit_inquiry(&mut self) {
        self.collecting_user_info = false;
        self.awaiting_field = None;
        self.stage = self.stage.advance_to(ConversationStage::InquirySubmitted);
    }

    pub(super) fn set_property_interest(&mut self, interest: impl Into<String>) {
        self.property_interest = Some(interest.into());
    }

    pub(super) fn set_property_type(&mut self, property_type: impl Into<String>) {
        self.property_type = Some(property_type.into());
    }

    pub(super) fn set_bedroom_count(&mut self, bedrooms: impl Into<String>) {
        self.bedroom_count = Some(bedrooms.into());
    }
}

fn write_once(slot: &mut Option<String>, value: &str) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value.to_string());
    true
}
