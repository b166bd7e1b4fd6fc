//! Application layer - turn orchestration and lead submission.
//!
//! Coordinates the pure dialogue components in `domain::conversation` with
//! the ports: `ChatSession` runs the turn pipeline, `SubmissionDispatcher`
//! hands completed leads to the inquiry API.

mod chat_session;
mod dispatcher;

pub use chat_session::{ChatError, ChatSession, ChatSettings, RequestAgentHook, TurnOutcome};
pub use dispatcher::{DispatchOutcome, SubmissionDispatcher};
