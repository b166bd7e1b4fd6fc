//! Mock Inquiry API for testing.
//!
//! Records every submission and answers from a queue of canned responses,
//! so dispatch behavior can be checked without a listings backend.
//!
//! # Example
//!
//! ```ignore
//! let api = MockInquiryApi::new()
//!     .with_error(InquiryApiError::network("connection reset"))
//!     .with_delay(Duration::from_millis(50));
//!
//! let result = api.submit_general_inquiry(&inquiry).await;
//! assert!(result.is_err());
//! assert_eq!(api.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::conversation::{GeneralInquiry, PropertyInquiry};
use crate::domain::foundation::PropertyId;
use crate::ports::{InquiryApi, InquiryApiError, InquiryReceipt};

/// A submission seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedInquiry {
    Property(PropertyInquiry),
    General(GeneralInquiry),
}

impl RecordedInquiry {
    pub fn message(&self) -> &str {
        match self {
            RecordedInquiry::Property(p) => &p.message,
            RecordedInquiry::General(g) => &g.message,
        }
    }
}

/// Mock inquiry API.
///
/// Responses are consumed in order; once the queue is empty every call is
/// accepted with a generated id.
#[derive(Debug, Clone, Default)]
pub struct MockInquiryApi {
    responses: Arc<Mutex<VecDeque<Result<InquiryReceipt, InquiryApiError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedInquiry>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockInquiryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a receipt.
    pub fn with_receipt(self, receipt: InquiryReceipt) -> Self {
        lock(&self.responses).push_back(Ok(receipt));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: InquiryApiError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<RecordedInquiry> {
        lock(&self.calls).clone()
    }

    async fn respond(&self, call: RecordedInquiry) -> Result<InquiryReceipt, InquiryApiError> {
        let n = {
            let mut calls = lock(&self.calls);
            calls.push(call);
            calls.len()
        };

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(InquiryReceipt::accepted(format!("mock-inquiry-{}", n))))
    }
}

#[async_trait]
impl InquiryApi for MockInquiryApi {
    async fn submit_property_inquiry(
        &self,
        property_id: &PropertyId,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<InquiryReceipt, InquiryApiError> {
        self.respond(RecordedInquiry::Property(PropertyInquiry {
            property_id: property_id.clone(),
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }))
        .await
    }

    async fn submit_general_inquiry(
        &self,
        inquiry: &GeneralInquiry,
    ) -> Result<InquiryReceipt, InquiryApiError> {
        self.respond(RecordedInquiry::General(inquiry.clone())).await
    }
}
