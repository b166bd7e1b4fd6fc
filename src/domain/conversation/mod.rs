//! Conversation domain module.
//!
//! The lead-capture dialogue engine: intent classification, slot
//! extraction, the stage/slot state machine, response rendering and the
//! lead payload built once a conversation completes. Everything here is
//! pure; side effects live in the application layer.

mod classifier;
mod extractor;
mod intent;
mod lead;
mod machine;
mod message;
mod property;
mod responder;
mod stage;
mod state;

pub use classifier::{
    looks_like_email, looks_like_phone, IntentClassifier, IntentRule, Matcher, MIN_PHONE_DIGITS,
};
pub use extractor::{ExtractedValue, SlotExtractor};
pub use intent::Intent;
pub use lead::{GeneralInquiry, LeadSubmission, PropertyInquiry};
pub use machine::{ConversationStateMachine, FlowConfig};
pub use message::{ChatMessage, Role};
pub use property::{AgentProfile, PropertyContext};
pub use responder::ResponseGenerator;
pub use stage::ConversationStage;
pub use state::{AwaitingField, ConversationState};
