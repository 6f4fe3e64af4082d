//! Payment submission boundary
//!
//! The checkout hands validated card details to a [`PaymentSubmitter`]. The
//! only shipped implementation logs the handoff; a network-backed service
//! plugs in behind the same trait.

mod client;
mod traits;

pub use client::LogSubmitter;
pub use traits::{PaymentSubmitter, SubmissionReceipt};

#[cfg(test)]
pub use traits::{MockPaymentSubmitter, SubmitError};
