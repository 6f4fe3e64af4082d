//! Application state definitions

use super::forms::{ErrorState, PaymentForm};
use crate::payment::SubmissionReceipt;
use std::collections::VecDeque;

/// Where the checkout is in its submit cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    /// Accepting input; also where a failed validation returns to
    #[default]
    Editing,
    /// The last submit passed validation and was handed off
    Submitted(SubmissionReceipt),
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// The checkout form values and focus
    pub form: PaymentForm,
    /// Messages from the latest validation pass
    pub field_errors: ErrorState,
    pub phase: CheckoutPhase,
    /// Queue of failures shown one at a time in the error dialog
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Record that an input value changed; any earlier handoff no longer
    /// matches what is on screen
    pub fn mark_edited(&mut self) {
        self.phase = CheckoutPhase::Editing;
    }

    /// Push an error message to the error queue
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    /// Whether an error dialog should be displayed
    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The error currently displayed
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    /// Dismiss the current error, revealing the next one if any
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}
