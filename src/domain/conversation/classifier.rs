//! Intent classification.
//!
//! Classification is an ordered rule table: each rule pairs a matcher with
//! the intent it produces and the first matching rule wins. Context rules
//! (what the engine is currently waiting for) sit at the top, followed by
//! contact-shape rules and finally keyword rules.

use once_cell::sync::Lazy;
use regex::Regex;

use super::intent::Intent;
use super::state::{AwaitingField, ConversationState};

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid literal")
});

static PHONE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9\s\-().]+$").expect("phone pattern is a valid literal")
});

/// Minimum number of digits for free text to be treated as a phone number.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Returns true if `text` has the shape `local@domain.tld`.
pub fn looks_like_email(text: &str) -> bool {
    EMAIL_SHAPE.is_match(text.trim())
}

/// Returns true if `text` consists of phone symbols with enough digits.
pub fn looks_like_phone(text: &str) -> bool {
    let text = text.trim();
    PHONE_SHAPE.is_match(text)
        && text.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
}

/// Predicate half of a classification rule.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Matches any non-empty text while the given field is awaited.
    Awaiting(AwaitingField),
    /// Matches a complete email address.
    EmailShape,
    /// Matches a complete phone number.
    PhoneShape,
    /// Matches when the pattern is found anywhere in the text.
    Pattern(Regex),
}

impl Matcher {
    /// Builds a case-insensitive whole-word matcher for any of `words`.
    pub fn keywords(words: &[&str]) -> Result<Self, regex::Error> {
        let alternatives = words
            .iter()
            .map(|w| regex::escape(w.trim()))
            .collect::<Vec<_>>()
            .join("|");
        Ok(Matcher::Pattern(Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives))?))
    }

    fn matches(&self, text: &str, state: &ConversationState) -> bool {
        match self {
            Matcher::Awaiting(field) => state.awaiting_field() == Some(*field),
            Matcher::EmailShape => looks_like_email(text),
            Matcher::PhoneShape => looks_like_phone(text),
            Matcher::Pattern(regex) => regex.is_match(text),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub matcher: Matcher,
}

impl IntentRule {
    pub fn new(intent: Intent, matcher: Matcher) -> Self {
        Self { intent, matcher }
    }
}

static DEFAULT_RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    default_rules().expect("default keyword tables compile")
});

fn default_rules() -> Result<Vec<IntentRule>, regex::Error> {
    Ok(vec![
        // What the engine asked for takes precedence over everything else.
        IntentRule::new(Intent::NameProvided, Matcher::Awaiting(AwaitingField::Name)),
        IntentRule::new(Intent::EmailProvided, Matcher::Awaiting(AwaitingField::Email)),
        IntentRule::new(Intent::PhoneProvided, Matcher::Awaiting(AwaitingField::Phone)),
        // Volunteered contact details.
        IntentRule::new(Intent::EmailProvided, Matcher::EmailShape),
        IntentRule::new(Intent::PhoneProvided, Matcher::PhoneShape),
        IntentRule::new(
            Intent::AgentContact,
            Matcher::keywords(&[
                "agent",
                "speak to",
                "talk to",
                "contact",
                "call me",
                "call back",
                "callback",
                "human",
                "representative",
            ])?,
        ),
        IntentRule::new(
            Intent::BuyIntent,
            Matcher::keywords(&[
                "buy",
                "buying",
                "purchase",
                "purchasing",
                "invest",
                "investing",
                "investment",
                "interested",
            ])?,
        ),
        IntentRule::new(
            Intent::SellIntent,
            Matcher::keywords(&["sell", "selling", "list my", "valuation", "value my"])?,
        ),
        IntentRule::new(
            Intent::ViewListings,
            Matcher::keywords(&[
                "listings",
                "listing",
                "show me",
                "browse",
                "viewing",
                "available",
            ])?,
        ),
        IntentRule::new(
            Intent::BedroomCount,
            Matcher::Pattern(Regex::new(
                r"(?i)(?:\b|\d)(?:bed(?:room)?s?|br|bhk)\b|\bstudio\b",
            )?),
        ),
        IntentRule::new(
            Intent::PropertyType,
            Matcher::keywords(&[
                "apartment",
                "apartments",
                "villa",
                "villas",
                "townhouse",
                "townhouses",
                "penthouse",
                "condo",
                "flat",
                "duplex",
                "house",
                "office",
                "land",
            ])?,
        ),
        IntentRule::new(
            Intent::LocationInquiry,
            Matcher::keywords(&[
                "location",
                "located",
                "where",
                "area",
                "neighborhood",
                "neighbourhood",
                "community",
                "near",
                "district",
            ])?,
        ),
        IntentRule::new(
            Intent::PropertySearch,
            Matcher::keywords(&[
                "looking for",
                "search",
                "searching",
                "find",
                "property",
                "properties",
                "home",
                "homes",
            ])?,
        ),
        IntentRule::new(
            Intent::Greeting,
            Matcher::keywords(&[
                "hi",
                "hello",
                "hey",
                "good morning",
                "good afternoon",
                "good evening",
                "greetings",
                "salam",
            ])?,
        ),
    ])
}

/// Maps raw text plus the current state to one intent.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Classifier with the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }

    /// Classifier with a custom rule table, evaluated in order.
    pub fn with_rules(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Returns the first rule matching `text`, if any.
    pub fn matching_rule(&self, text: &str, state: &ConversationState) -> Option<&IntentRule> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.rules.iter().find(|rule| rule.matcher.matches(text, state))
    }

    /// Classifies `text`; falls back to [`Intent::Unknown`].
    pub fn classify(&self, text: &str, state: &ConversationState) -> Intent {
        self.matching_rule(text, state)
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Unknown)
    }
}
