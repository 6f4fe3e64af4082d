//! Form domain layer
//!
//! Checkout form values, the keystroke filter that guards them, and the
//! validator that decides whether the form may be submitted.

mod field;
mod filter;
mod form_state;
mod validation;

pub use field::FormField;
pub use form_state::{Form, PaymentForm, PaymentRecord};
pub use validation::{current_year, ErrorState};

#[cfg(test)]
pub use field::FieldKey;
