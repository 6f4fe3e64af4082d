//! Logging payment submitter
//!
//! Encodes the record as the JSON payload a payment service would receive
//! and logs a redacted summary instead of sending it anywhere.

use super::traits::{PaymentSubmitter, SubmissionReceipt, SubmitError};
use crate::state::PaymentRecord;
use async_trait::async_trait;

/// Submitter that records handoffs in the log only
#[derive(Debug, Default)]
pub struct LogSubmitter {
    /// Number of records handed off this session
    submitted: usize,
}

impl LogSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

#[async_trait]
impl PaymentSubmitter for LogSubmitter {
    async fn submit(&mut self, record: &PaymentRecord) -> Result<SubmissionReceipt, SubmitError> {
        let payload = serde_json::to_vec(record)?;
        let receipt = SubmissionReceipt::new();
        self.submitted += 1;

        tracing::info!(
            reference = %receipt.reference,
            cardholder = %record.name,
            card = %format!("****{}", record.last_four()),
            expiry = %record.expiry_date,
            payload_bytes = payload.len(),
            session_count = self.submitted,
            "Payment record handed off"
        );

        Ok(receipt)
    }
}
