//! Integration tests for complete chat conversations.
//!
//! These tests drive a `ChatSession` end to end:
//! 1. Visitor messages are classified and slots extracted
//! 2. The conversation advances through greeting, collection and submission
//! 3. The completed lead reaches the inquiry API exactly once
//!
//! Uses `MockInquiryApi` so no listings backend is needed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use property_concierge::adapters::{
    InMemoryRateLimiter, MockInquiryApi, RateLimitConfig, RecordedInquiry,
};
use property_concierge::application::{
    ChatSession, ChatSettings, DispatchOutcome, SubmissionDispatcher,
};
use property_concierge::domain::conversation::{
    AgentProfile, AwaitingField, ConversationStage, FlowConfig, Intent, PropertyContext, Role,
};
use property_concierge::domain::foundation::PropertyId;
use property_concierge::ports::{InquiryApiError, InquiryReceipt};

// =============================================================================
// Test Infrastructure
// =============================================================================

const PLACEHOLDER_EMAIL: &str = "not-provided@chat.local";

fn dispatcher(api: &MockInquiryApi) -> SubmissionDispatcher {
    SubmissionDispatcher::new(Arc::new(api.clone()), PLACEHOLDER_EMAIL)
}

fn session(api: &MockInquiryApi, property: Option<PropertyContext>) -> ChatSession {
    ChatSession::new(dispatcher(api), ChatSettings::immediate(), property).unwrap()
}

fn marina_tower() -> PropertyContext {
    PropertyContext::new(PropertyId::new("42").unwrap(), "Marina Tower")
}

async fn say_all(session: &mut ChatSession, lines: &[&str]) {
    for line in lines {
        session.send_message(line).await.unwrap();
    }
}

// =============================================================================
// Listing page conversations
// =============================================================================

#[tokio::test]
async fn buyer_on_listing_page_submits_property_inquiry() {
    let api = MockInquiryApi::new();
    let mut chat = session(&api, Some(marina_tower()));

    say_all(
        &mut chat,
        &["I want to buy a property", "John Doe", "+971501234567"],
    )
    .await;

    let state = chat.state();
    assert_eq!(state.stage(), ConversationStage::InquirySubmitted);
    assert_eq!(state.user_name(), Some("John Doe"));
    assert_eq!(state.user_phone(), Some("+971501234567"));

    assert!(chat.dispatch_outcome().await.unwrap().is_submitted());
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    let RecordedInquiry::Property(inquiry) = &calls[0] else {
        panic!("expected a listing inquiry, got {:?}", calls[0]);
    };
    assert_eq!(inquiry.property_id.as_str(), "42");
    assert_eq!(inquiry.name, "John Doe");
    assert_eq!(inquiry.email, PLACEHOLDER_EMAIL);
    assert!(inquiry.message.contains("Marina Tower"));
    assert!(inquiry.message.contains("+971501234567"));
}

#[tokio::test]
async fn listing_agent_follows_up_after_submission() {
    let api = MockInquiryApi::new();
    let property = marina_tower().with_agent(AgentProfile::new("Sara", "Khan"));
    let mut chat = session(&api, Some(property));

    say_all(&mut chat, &["Is this listing still available?", "Omar"]).await;
    let turn = chat.send_message("0501234567").await.unwrap();

    let agent = turn.agent_message.expect("agent follow-up");
    assert_eq!(agent.sender(), Some("Sara Khan"));
    assert!(agent.text().contains("Marina Tower"));

    let roles: Vec<Role> = chat.messages().iter().map(|m| m.role()).collect();
    assert_eq!(roles.last(), Some(&Role::Agent));
    assert_eq!(roles.iter().filter(|r| **r == Role::Agent).count(), 1);
}

#[tokio::test]
async fn welcome_mentions_the_listing() {
    let chat = session(&MockInquiryApi::new(), Some(marina_tower()));

    assert_eq!(chat.messages().len(), 1);
    assert!(chat.messages()[0].text().contains("Marina Tower"));
}

// =============================================================================
// General conversations
// =============================================================================

#[tokio::test]
async fn bedroom_request_opens_collection() {
    let api = MockInquiryApi::new();
    let mut chat = session(&api, None);

    let turn = chat.send_message("3 bedroom").await.unwrap();

    assert_eq!(turn.intent, Intent::BedroomCount);
    assert_eq!(chat.state().bedroom_count(), Some("3"));
    assert!(chat.state().is_collecting_user_info());
    assert_eq!(chat.state().awaiting_field(), Some(AwaitingField::Name));
}

#[tokio::test]
async fn studio_counts_as_zero_bedrooms() {
    let mut chat = session(&MockInquiryApi::new(), None);

    chat.send_message("studio").await.unwrap();

    assert_eq!(chat.state().bedroom_count(), Some("0"));
}

#[tokio::test]
async fn general_inquiry_carries_preferences() {
    let api = MockInquiryApi::new();
    let mut chat = session(&api, None);

    say_all(&mut chat, &["2 bedroom", "Layla", "+971 50 765 4321"]).await;

    chat.dispatch_outcome().await;
    let calls = api.calls();
    let RecordedInquiry::General(inquiry) = &calls[0] else {
        panic!("expected a general inquiry");
    };
    assert_eq!(inquiry.name, "Layla");
    assert_eq!(inquiry.phone, "+971 50 765 4321");
    assert_eq!(inquiry.bedroom_count.as_deref(), Some("2"));
    assert_eq!(inquiry.email, None);
}

#[tokio::test]
async fn optional_email_is_collected_when_enabled() {
    let api = MockInquiryApi::new();
    let settings = ChatSettings::immediate().with_flow(FlowConfig {
        request_email: true,
    });
    let mut chat = ChatSession::new(dispatcher(&api), settings, Some(marina_tower())).unwrap();

    say_all(&mut chat, &["I'd like to buy", "John Doe"]).await;
    assert_eq!(chat.state().awaiting_field(), Some(AwaitingField::Email));

    say_all(&mut chat, &["john@example.com", "0501234567"]).await;

    chat.dispatch_outcome().await;
    let calls = api.calls();
    let RecordedInquiry::Property(inquiry) = &calls[0] else {
        panic!("expected a listing inquiry");
    };
    assert_eq!(inquiry.email, "john@example.com");
}

#[tokio::test]
async fn small_talk_never_submits() {
    let api = MockInquiryApi::new();
    let mut chat = session(&api, None);

    say_all(&mut chat, &["hello", "what's the weather?", "ok bye"]).await;

    assert_eq!(chat.state().stage(), ConversationStage::Greeting);
    assert_eq!(chat.dispatch_outcome().await, None);
    assert_eq!(api.call_count(), 0);
}

// =============================================================================
// Dispatch guarantees
// =============================================================================

#[tokio::test]
async fn extra_turns_after_submission_do_not_resubmit() {
    let api = MockInquiryApi::new();
    let mut chat = session(&api, Some(marina_tower()));

    say_all(&mut chat, &["buy", "John Doe", "+971501234567"]).await;
    say_all(
        &mut chat,
        &["thanks!", "+971509999999", "Jane Doe", "I want to buy another one", "4 bedrooms"],
    )
    .await;

    chat.dispatch_outcome().await;
    assert_eq!(api.call_count(), 1);
    assert_eq!(chat.state().user_name(), Some("John Doe"));
    assert_eq!(chat.state().user_phone(), Some("+971501234567"));
}

#[tokio::test]
async fn failed_submission_is_invisible_to_visitor() {
    let api = MockInquiryApi::new().with_error(InquiryApiError::Status {
        status: 500,
        body: "internal".to_string(),
    });
    let mut chat = session(&api, None);

    say_all(&mut chat, &["I want to sell", "Omar"]).await;
    let turn = chat.send_message("0501234567").await.unwrap();

    assert_eq!(turn.stage, ConversationStage::InquirySubmitted);
    assert!(!turn.reply.text().is_empty());
    assert!(matches!(
        chat.dispatch_outcome().await,
        Some(DispatchOutcome::Failed(InquiryApiError::Status { status: 500, .. }))
    ));
    // later turns are still answered
    assert!(chat.send_message("hello?").await.is_ok());
}

#[tokio::test]
async fn rejected_receipt_is_reported_as_rejected() {
    let api = MockInquiryApi::new().with_receipt(InquiryReceipt::rejected("spam filter"));
    let mut chat = session(&api, None);

    say_all(&mut chat, &["buy", "Omar", "0501234567"]).await;

    assert_eq!(
        chat.dispatch_outcome().await,
        Some(DispatchOutcome::Rejected {
            message: Some("spam filter".to_string())
        })
    );
}

#[tokio::test]
async fn sessions_share_the_inquiry_route_limit() {
    let api = MockInquiryApi::new();
    let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig::for_inquiries(1, 3600)));
    let dispatcher = dispatcher(&api).with_rate_limiter(limiter);

    let mut outcomes = Vec::new();
    for name in ["Omar", "Layla", "John"] {
        let mut chat =
            ChatSession::new(dispatcher.clone(), ChatSettings::immediate(), None).unwrap();
        say_all(&mut chat, &["buy", name, "0501234567"]).await;
        assert!(chat.state().is_terminal());
        outcomes.push(chat.dispatch_outcome().await);
    }

    assert!(outcomes[0].as_ref().is_some_and(DispatchOutcome::is_submitted));
    for outcome in &outcomes[1..] {
        assert!(matches!(outcome, Some(DispatchOutcome::Throttled { .. })));
    }
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn reply_does_not_wait_for_slow_backend() {
    let api = MockInquiryApi::new().with_delay(Duration::from_secs(60));
    let mut chat = session(&api, None);

    let turns = async {
        say_all(&mut chat, &["buy", "Omar", "0501234567"]).await;
    };
    tokio::time::timeout(Duration::from_secs(5), turns)
        .await
        .expect("turns finish while the submission is pending");

    assert!(chat.state().is_terminal());
    chat.close();
}

// =============================================================================
// Agent requests
// =============================================================================

#[tokio::test]
async fn request_agent_callback_fires_once_per_agent_turn() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut chat = session(&MockInquiryApi::new(), None).on_request_agent(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    chat.send_message("hello").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let turn = chat.send_message("I need to speak to an agent").await.unwrap();
    assert_eq!(turn.intent, Intent::AgentContact);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(chat.state().awaiting_field(), Some(AwaitingField::Name));
}
