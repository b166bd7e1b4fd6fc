//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `conversation` - Lead-capture dialogue engine (intents, slots, stages, responses)

pub mod conversation;
pub mod foundation;
