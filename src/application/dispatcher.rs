//! SubmissionDispatcher - hands a completed conversation to the inquiry API.
//!
//! Dispatch never fails from the caller's point of view: every path ends in
//! a `DispatchOutcome`, and the outcome is logged here. Nothing is retried.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::adapters::rate_limiter::INQUIRY_RESOURCE;
use crate::domain::conversation::{ConversationState, LeadSubmission};
use crate::domain::foundation::ConversationId;
use crate::ports::{
    InquiryApi, InquiryApiError, InquiryReceipt, RateLimitKey, RateLimitResult, RateLimiter,
};

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The backend stored the inquiry.
    Submitted(InquiryReceipt),
    /// The backend answered but refused the inquiry.
    Rejected { message: Option<String> },
    /// The rate limiter denied the submission before any request was made.
    Throttled { retry_after_secs: u32 },
    /// The request itself failed.
    Failed(InquiryApiError),
    /// The state was not a complete lead; nothing was sent.
    Skipped,
}

impl DispatchOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, DispatchOutcome::Submitted(_))
    }
}

/// Converts terminal conversation states into inquiry API calls.
#[derive(Clone)]
pub struct SubmissionDispatcher {
    api: Arc<dyn InquiryApi>,
    limiter: Option<Arc<dyn RateLimiter>>,
    placeholder_email: String,
}

impl SubmissionDispatcher {
    pub fn new(api: Arc<dyn InquiryApi>, placeholder_email: impl Into<String>) -> Self {
        Self {
            api,
            limiter: None,
            placeholder_email: placeholder_email.into(),
        }
    }

    /// Consults `limiter` before every submission.
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn placeholder_email(&self) -> &str {
        &self.placeholder_email
    }

    /// Builds the lead from `state` and submits it.
    pub async fn dispatch(
        &self,
        conversation_id: ConversationId,
        state: &ConversationState,
    ) -> DispatchOutcome {
        match LeadSubmission::from_state(state, &self.placeholder_email) {
            Some(submission) => self.submit(conversation_id, &submission).await,
            None => {
                warn!(%conversation_id, "Dispatch requested for an incomplete lead");
                DispatchOutcome::Skipped
            }
        }
    }

    /// Submits a prepared lead.
    pub async fn submit(
        &self,
        conversation_id: ConversationId,
        submission: &LeadSubmission,
    ) -> DispatchOutcome {
        if let Some(retry_after_secs) = self.throttled(conversation_id).await {
            warn!(
                %conversation_id,
                kind = submission.kind(),
                retry_after_secs,
                "Inquiry submission throttled"
            );
            return DispatchOutcome::Throttled { retry_after_secs };
        }

        let result = match submission {
            LeadSubmission::Property(inquiry) => {
                self.api
                    .submit_property_inquiry(
                        &inquiry.property_id,
                        &inquiry.name,
                        &inquiry.email,
                        &inquiry.message,
                    )
                    .await
            }
            LeadSubmission::General(inquiry) => self.api.submit_general_inquiry(inquiry).await,
        };

        match result {
            Ok(receipt) if receipt.success => {
                info!(
                    %conversation_id,
                    kind = submission.kind(),
                    inquiry_id = receipt.id.as_deref().unwrap_or("-"),
                    "Inquiry submitted"
                );
                DispatchOutcome::Submitted(receipt)
            }
            Ok(receipt) => {
                warn!(
                    %conversation_id,
                    kind = submission.kind(),
                    reason = receipt.message.as_deref().unwrap_or("-"),
                    "Inquiry rejected by backend"
                );
                DispatchOutcome::Rejected {
                    message: receipt.message,
                }
            }
            Err(err) => {
                error!(
                    %conversation_id,
                    kind = submission.kind(),
                    transient = err.is_transient(),
                    error = %err,
                    "Inquiry submission failed"
                );
                DispatchOutcome::Failed(err)
            }
        }
    }

    /// Returns the retry delay when the limiter denies this submission.
    ///
    /// The quota belongs to the inquiry route, so every conversation using
    /// this limiter draws from it. A limiter error lets the submission through.
    async fn throttled(&self, conversation_id: ConversationId) -> Option<u32> {
        let limiter = self.limiter.as_ref()?;
        match limiter.check(RateLimitKey::route(INQUIRY_RESOURCE)).await {
            Ok(RateLimitResult::Denied(denied)) => Some(denied.retry_after_secs),
            Ok(RateLimitResult::Allowed(status)) => {
                debug!(%conversation_id, remaining = status.remaining, "Inquiry route quota");
                None
            }
            Err(err) => {
                warn!(%conversation_id, error = %err, "Rate limiter unavailable");
                None
            }
        }
    }
}
