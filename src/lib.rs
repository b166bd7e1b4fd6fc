//! Property Concierge - lead-capture chat for real-estate listing sites
//!
//! A rule-based dialogue engine that answers visitors, collects their name
//! and phone number (and optionally email), and submits the lead to the
//! listings backend exactly once per conversation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
