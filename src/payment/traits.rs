//! Trait abstraction for the payment service to enable mocking in tests

use crate::state::PaymentRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Acknowledgement returned once a record has been handed off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }

    /// Short reference for the status bar
    pub fn short_reference(&self) -> String {
        self.reference.simple().to_string()[..8].to_string()
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// Failures reported by a payment service
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Failed to encode payment record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Receives validated payment records from the checkout
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentSubmitter: Send + Sync {
    /// Hand off a validated record
    async fn submit(&mut self, record: &PaymentRecord) -> Result<SubmissionReceipt, SubmitError>;
}
