//! Inquiry API Port - Interface for the site's lead intake endpoints.
//!
//! The listings backend exposes two intake routes: one for inquiries about a
//! specific listing and one for general inquiries. This port hides how they
//! are reached so the dispatcher can be exercised without a network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::conversation::GeneralInquiry;
use crate::domain::foundation::PropertyId;

/// Port for submitting captured leads.
#[async_trait]
pub trait InquiryApi: Send + Sync {
    /// Submits an inquiry about one listing.
    async fn submit_property_inquiry(
        &self,
        property_id: &PropertyId,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<InquiryReceipt, InquiryApiError>;

    /// Submits an inquiry not tied to a listing.
    async fn submit_general_inquiry(
        &self,
        inquiry: &GeneralInquiry,
    ) -> Result<InquiryReceipt, InquiryApiError>;
}

/// Body returned by the intake endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryReceipt {
    pub success: bool,
    /// Identifier of the stored inquiry, when the backend returns one.
    #[serde(default, alias = "inquiryId")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InquiryReceipt {
    pub fn accepted(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: Some(id.into()),
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            message: Some(message.into()),
        }
    }
}

/// Errors reaching the intake endpoints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InquiryApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("inquiry API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication with inquiry API failed")]
    Unauthorized,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl InquiryApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Whether a later attempt could plausibly succeed.
    ///
    /// The dispatcher never retries on its own; this only feeds logging.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Unauthorized | Self::InvalidResponse(_) => false,
        }
    }
}
