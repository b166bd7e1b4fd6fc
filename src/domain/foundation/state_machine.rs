//! State machine trait for stage enums.
//!
//! Provides a consistent interface for validating and performing stage
//! transitions. The conversation stage is the main implementor.

use super::ValidationError;

/// Trait for enums that represent forward-only state machines.
///
/// Implementors define valid transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ConversationStage {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Greeting, CollectingInfo) |
///             (CollectingInfo, InquirySubmitted)
///         )
///     }
///     // ...
/// }
///
/// let stage = current.transition_to(ConversationStage::InquirySubmitted)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Moves to `target` when the transition is valid, otherwise stays put.
    ///
    /// Used by pure transition functions that must never fail.
    fn advance_to(&self, target: Self) -> Self {
        self.transition_to(target).unwrap_or(*self)
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Draft,
        Active,
        Closed,
    }

    impl StateMachine for TestStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use TestStatus::*;
            matches!((self, target), (Draft, Active) | (Active, Closed))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use TestStatus::*;
            match self {
                Draft => vec![Active],
                Active => vec![Closed],
                Closed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let status = TestStatus::Draft;
        assert_eq!(status.transition_to(TestStatus::Active), Ok(TestStatus::Active));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let status = TestStatus::Draft;
        assert!(status.transition_to(TestStatus::Closed).is_err());
    }

    #[test]
    fn advance_to_stays_put_on_invalid_transition() {
        assert_eq!(TestStatus::Closed.advance_to(TestStatus::Draft), TestStatus::Closed);
        assert_eq!(TestStatus::Draft.advance_to(TestStatus::Closed), TestStatus::Draft);
    }

    #[test]
    fn advance_to_moves_on_valid_transition() {
        assert_eq!(TestStatus::Active.advance_to(TestStatus::Closed), TestStatus::Closed);
    }

    #[test]
    fn is_terminal_only_for_closed() {
        assert!(TestStatus::Closed.is_terminal());
        assert!(!TestStatus::Draft.is_terminal());
        assert!(!TestStatus::Active.is_terminal());
    }
}
