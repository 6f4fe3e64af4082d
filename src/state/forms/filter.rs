//! Keystroke filtering
//!
//! Each input has an acceptance predicate that every proposed value must
//! pass before it replaces the current one. Rejected input is dropped
//! without feedback.

use super::field::FieldKey;

/// Acceptance predicate for a proposed field value
pub type Predicate = fn(&str) -> bool;

/// Predicate table keyed by field id
const FILTERS: &[(&str, Predicate)] = &[
    ("name", has_no_digits),
    ("cardNumber", is_digits),
    ("expiryDate", is_digits_or_slash),
    ("cvv", is_digits),
];

fn has_no_digits(value: &str) -> bool {
    !value.chars().any(|c| c.is_ascii_digit())
}

fn is_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

fn is_digits_or_slash(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit() || c == '/')
}

fn accept_any(_value: &str) -> bool {
    true
}

/// Look up the predicate for a field id. Unknown ids are unfiltered.
pub fn filter_for(id: &str) -> Predicate {
    FILTERS
        .iter()
        .find(|(field_id, _)| *field_id == id)
        .map(|(_, predicate)| *predicate)
        .unwrap_or(accept_any)
}

/// Whether `proposed` may become the new value of `key`
pub fn accepts(key: FieldKey, proposed: &str) -> bool {
    if let Some(max) = key.max_len() {
        if proposed.chars().count() > max {
            return false;
        }
    }
    filter_for(key.id())(proposed)
}
