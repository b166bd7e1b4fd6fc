//! Slot extraction.
//!
//! Pulls the value a turn contributes to the conversation out of the raw
//! text. Extraction never fails: when nothing more specific can be parsed
//! the trimmed text itself is used.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::intent::Intent;

static BEDROOM_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)|\b(one|two|three|four|five|six|studio)\b")
        .expect("bedroom pattern is a valid literal")
});

/// A slot value produced by one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "value", rename_all = "snake_case")]
pub enum ExtractedValue {
    Name(String),
    Phone(String),
    Email(String),
    Bedrooms(String),
    PropertyType(String),
}

impl ExtractedValue {
    pub fn as_str(&self) -> &str {
        match self {
            ExtractedValue::Name(v)
            | ExtractedValue::Phone(v)
            | ExtractedValue::Email(v)
            | ExtractedValue::Bedrooms(v)
            | ExtractedValue::PropertyType(v) => v,
        }
    }
}

/// Stateless extractor; one value per intent at most.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotExtractor;

impl SlotExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the slot value carried by `intent`, if it carries one.
    pub fn extract(&self, intent: Intent, text: &str) -> Option<ExtractedValue> {
        match intent {
            Intent::NameProvided => Some(ExtractedValue::Name(text.trim().to_string())),
            // Phone and email are stored exactly as typed.
            Intent::PhoneProvided => Some(ExtractedValue::Phone(text.to_string())),
            Intent::EmailProvided => Some(ExtractedValue::Email(text.to_string())),
            Intent::BedroomCount => Some(ExtractedValue::Bedrooms(bedroom_count(text))),
            Intent::PropertyType => Some(ExtractedValue::PropertyType(text.trim().to_string())),
            _ => None,
        }
    }
}

/// Normalises a bedroom mention to a digit string (`studio` is `"0"`).
fn bedroom_count(text: &str) -> String {
    let Some(caps) = BEDROOM_TOKEN.captures(text) else {
        return text.trim().to_string();
    };
    if let Some(digits) = caps.get(1) {
        return digits.as_str().to_string();
    }
    let word = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());
    match word.as_deref() {
        Some("studio") => "0",
        Some("one") => "1",
        Some("two") => "2",
        Some("three") => "3",
        Some("four") => "4",
        Some("five") => "5",
        Some("six") => "6",
        _ => return text.trim().to_string(),
    }
    .to_string()
}
