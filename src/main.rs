//! Terminal chat against a live listings backend.
//!
//! Reads visitor messages from stdin and prints the transcript to stdout.
//! Logs go to stderr. Type `/quit` or send EOF to leave.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use property_concierge::adapters::{HttpInquiryApi, InMemoryRateLimiter};
use property_concierge::application::{ChatSession, SubmissionDispatcher};
use property_concierge::config::{AppConfig, LoggingConfig};
use property_concierge::domain::conversation::{ChatMessage, Role};

/// How long to wait for a pending submission on exit.
const DISPATCH_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_message(message: &ChatMessage) {
    let speaker = match message.role() {
        Role::User => "you",
        Role::Bot => "concierge",
        Role::Agent => message.sender().unwrap_or("agent"),
    };
    println!("[{}] {}", speaker, message.text());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let api = HttpInquiryApi::new(config.inquiry_api.client_config())?;
    let mut dispatcher = SubmissionDispatcher::new(Arc::new(api), &config.chat.placeholder_email);
    if config.rate_limit.enabled {
        let limiter = InMemoryRateLimiter::new(config.rate_limit.limiter_config());
        dispatcher = dispatcher.with_rate_limiter(Arc::new(limiter));
    }

    let property = config.property.as_ref().map(|p| p.context()).transpose()?;
    let mut session = ChatSession::new(dispatcher, config.chat.settings(), property)?
        .on_request_agent(|| info!("Visitor asked for a human agent"));
    info!(conversation_id = %session.id(), "Chat session started");

    let mut printed = 0;
    for message in session.messages() {
        print_message(message);
        printed += 1;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        session.send_message(line).await?;
        // the visitor's own line is already on screen
        for message in &session.messages()[printed..] {
            if message.role() != Role::User {
                print_message(message);
            }
        }
        printed = session.messages().len();
    }

    match tokio::time::timeout(DISPATCH_DRAIN_TIMEOUT, session.dispatch_outcome()).await {
        Ok(Some(outcome)) => info!(?outcome, "Inquiry dispatch finished"),
        Ok(None) => {}
        Err(_) => warn!("Gave up waiting for inquiry dispatch"),
    }
    session.close();

    Ok(())
}
