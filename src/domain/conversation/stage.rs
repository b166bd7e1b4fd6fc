//! Conversation stage state machine.
//!
//! Defines the coarse phases of a lead-capture conversation and the
//! forward-only transitions between them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The coarse-grained phase of a conversation.
///
/// Conversations only move forward:
/// - `Greeting`: visitor has not expressed a lead-worthy intent yet
/// - `CollectingInfo`: contact details are being solicited
/// - `InquirySubmitted`: lead handed to the inquiry API, read-only from here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    #[default]
    Greeting,
    CollectingInfo,
    InquirySubmitted,
}

impl ConversationStage {
    /// Position in the forward ordering, used for monotonicity checks.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Greeting => 0,
            Self::CollectingInfo => 1,
            Self::InquirySubmitted => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::CollectingInfo => "collecting_info",
            Self::InquirySubmitted => "inquiry_submitted",
        }
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for ConversationStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationStage::*;
        matches!(
            (self, target),
            // First lead-worthy intent opens info collection
            (Greeting, CollectingInfo) |
            // Phone captured
            (CollectingInfo, InquirySubmitted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationStage::*;
        match self {
            Greeting => vec![CollectingInfo],
            CollectingInfo => vec![InquirySubmitted],
            InquirySubmitted => vec![],
        }
    }
}
