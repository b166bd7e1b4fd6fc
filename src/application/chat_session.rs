//! ChatSession - drives one conversation turn by turn.
//!
//! Each turn runs classify, extract, transition, maybe-dispatch and respond
//! in order. The session owns the transcript and the only mutable
//! `ConversationState`; `send_message` takes `&mut self`, so one turn is in
//! flight at a time.
//!
//! The inquiry is submitted on a spawned task the moment the conversation
//! reaches its terminal stage. The reply does not wait for it, and a failed
//! submission never reaches the user.

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::conversation::{
    ChatMessage, ConversationStage, ConversationState, ConversationStateMachine, FlowConfig,
    Intent, IntentClassifier, PropertyContext, ResponseGenerator, SlotExtractor,
};
use crate::domain::foundation::{ConversationId, DomainError};

use super::dispatcher::{DispatchOutcome, SubmissionDispatcher};

/// Timing and flow settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSettings {
    /// Pause before each bot reply, while the typing indicator is shown.
    pub typing_delay: Duration,
    /// Pause before the listing agent's follow-up message.
    pub agent_followup_delay: Duration,
    pub flow: FlowConfig,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(1000),
            agent_followup_delay: Duration::from_millis(2000),
            flow: FlowConfig::default(),
        }
    }
}

impl ChatSettings {
    /// No artificial delays.
    pub fn immediate() -> Self {
        Self {
            typing_delay: Duration::ZERO,
            agent_followup_delay: Duration::ZERO,
            flow: FlowConfig::default(),
        }
    }

    pub fn with_flow(mut self, flow: FlowConfig) -> Self {
        self.flow = flow;
        self
    }
}

/// Errors returned to the caller of `send_message`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatError {
    #[error("message text cannot be empty")]
    EmptyMessage,

    #[error("chat session is closed")]
    Closed,

    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result of one user turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub intent: Intent,
    pub stage: ConversationStage,
    pub reply: ChatMessage,
    /// Follow-up from the listing agent, on the turn that completed the lead.
    pub agent_message: Option<ChatMessage>,
    /// Whether this turn started the inquiry submission.
    pub dispatched: bool,
}

/// Callback fired on turns that ask for a human agent.
pub type RequestAgentHook = Box<dyn Fn() + Send + Sync>;

enum DispatchSlot {
    Idle,
    InFlight(JoinHandle<DispatchOutcome>),
    Done(Option<DispatchOutcome>),
}

/// One conversation with the concierge.
pub struct ChatSession {
    id: ConversationId,
    classifier: IntentClassifier,
    extractor: SlotExtractor,
    machine: ConversationStateMachine,
    responder: ResponseGenerator,
    dispatcher: SubmissionDispatcher,
    settings: ChatSettings,
    state: ConversationState,
    messages: Vec<ChatMessage>,
    typing: watch::Sender<bool>,
    dispatch: DispatchSlot,
    on_request_agent: Option<RequestAgentHook>,
    closed: bool,
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("stage", &self.state.stage())
            .field("messages", &self.messages.len())
            .field("closed", &self.closed)
            .finish()
    }
}

/// Clears the typing indicator when the turn ends or is abandoned.
struct TypingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> TypingGuard<'a> {
    fn start(typing: &'a watch::Sender<bool>) -> Self {
        typing.send_replace(true);
        Self(typing)
    }
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl ChatSession {
    /// Opens a session and posts the welcome message.
    pub fn new(
        dispatcher: SubmissionDispatcher,
        settings: ChatSettings,
        property: Option<PropertyContext>,
    ) -> Result<Self, ChatError> {
        let responder = ResponseGenerator::new();
        let welcome = ChatMessage::bot(responder.welcome(property.as_ref()))?;
        let (typing, _) = watch::channel(false);

        Ok(Self {
            id: ConversationId::new(),
            classifier: IntentClassifier::new(),
            extractor: SlotExtractor::new(),
            machine: ConversationStateMachine::new(settings.flow),
            responder,
            dispatcher,
            settings,
            state: ConversationState::new(property),
            messages: vec![welcome],
            typing,
            dispatch: DispatchSlot::Idle,
            on_request_agent: None,
            closed: false,
        })
    }

    /// Registers the callback for AGENT_CONTACT turns.
    pub fn on_request_agent(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_request_agent = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn is_typing(&self) -> bool {
        *self.typing.borrow()
    }

    /// Watches the typing indicator from another task.
    pub fn typing_indicator(&self) -> watch::Receiver<bool> {
        self.typing.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Processes one user message and appends the replies to the transcript.
    pub async fn send_message(&mut self, text: &str) -> Result<TurnOutcome, ChatError> {
        if self.closed {
            return Err(ChatError::Closed);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.messages.push(ChatMessage::user(text)?);

        let intent = self.classifier.classify(text, &self.state);
        let extracted = self.extractor.extract(intent, text);
        let previous = std::mem::take(&mut self.state);
        self.state = self.machine.transition(&previous, intent, extracted.as_ref());

        debug!(
            conversation_id = %self.id,
            intent = %intent,
            stage = %self.state.stage(),
            awaiting = self.state.awaiting_field().map(|f| f.as_str()).unwrap_or("-"),
            "Processed turn"
        );

        let dispatched = self.state.entered_terminal_from(&previous) && self.start_dispatch();

        if intent == Intent::AgentContact {
            if let Some(hook) = &self.on_request_agent {
                hook();
            }
        }

        let reply = {
            let _typing = TypingGuard::start(&self.typing);
            if !self.settings.typing_delay.is_zero() {
                sleep(self.settings.typing_delay).await;
            }
            let text = self.responder.render(
                intent,
                text,
                &self.state,
                self.state.property_context(),
            );
            ChatMessage::bot(text)?
        };
        self.messages.push(reply.clone());

        let agent_message = if dispatched {
            self.agent_follow_up().await?
        } else {
            None
        };

        Ok(TurnOutcome {
            intent,
            stage: self.state.stage(),
            reply,
            agent_message,
            dispatched,
        })
    }

    /// Waits for the submission started by this session.
    ///
    /// Returns `None` when nothing was submitted or the task was aborted.
    pub async fn dispatch_outcome(&mut self) -> Option<DispatchOutcome> {
        if let DispatchSlot::InFlight(handle) = &mut self.dispatch {
            let outcome = match handle.await {
                Ok(outcome) => Some(outcome),
                Err(err) => {
                    warn!(conversation_id = %self.id, error = %err, "Inquiry dispatch task ended early");
                    None
                }
            };
            self.dispatch = DispatchSlot::Done(outcome);
        }

        match &self.dispatch {
            DispatchSlot::Done(outcome) => outcome.clone(),
            _ => None,
        }
    }

    /// Ends the session, abandoning any in-flight submission.
    pub fn close(&mut self) {
        if let DispatchSlot::InFlight(handle) = &self.dispatch {
            handle.abort();
        }
        self.typing.send_replace(false);
        self.closed = true;
        debug!(conversation_id = %self.id, "Chat session closed");
    }

    fn start_dispatch(&mut self) -> bool {
        if !matches!(self.dispatch, DispatchSlot::Idle) {
            return false;
        }

        info!(conversation_id = %self.id, "Lead complete, submitting inquiry");
        let dispatcher = self.dispatcher.clone();
        let state = self.state.clone();
        let id = self.id;
        self.dispatch = DispatchSlot::InFlight(tokio::spawn(async move {
            dispatcher.dispatch(id, &state).await
        }));
        true
    }

    async fn agent_follow_up(&mut self) -> Result<Option<ChatMessage>, ChatError> {
        let Some((sender, text)) = self.responder.agent_follow_up(&self.state) else {
            return Ok(None);
        };

        if !self.settings.agent_followup_delay.is_zero() {
            sleep(self.settings.agent_followup_delay).await;
        }

        let message = ChatMessage::agent(sender, text)?;
        self.messages.push(message.clone());
        Ok(Some(message))
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let DispatchSlot::InFlight(handle) = &self.dispatch {
            handle.abort();
        }
    }
}
