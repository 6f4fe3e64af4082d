//! Submission validation
//!
//! Runs every rule against the whole form and collects one message per
//! failing field. Rules run in a fixed order and a later rule replaces an
//! earlier message for the same field.

use super::field::FieldKey;
use chrono::Datelike;
use std::collections::BTreeMap;

pub const CARD_NUMBER_LENGTH_MESSAGE: &str = "Card number must be exactly 16 digits";
pub const CVV_LENGTH_MESSAGE: &str = "CVV must be exactly 3 digits";
pub const EXPIRY_MESSAGE: &str = "Invalid expiry date. Use MM/YY and must be a future date.";

/// Per-field validation messages from the latest pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    messages: BTreeMap<FieldKey, String>,
}

impl ErrorState {
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.messages.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        self.messages.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn set(&mut self, key: FieldKey, message: impl Into<String>) {
        self.messages.insert(key, message.into());
    }
}

/// The four values the validator looks at
#[derive(Debug, Clone, Copy)]
pub struct Values<'a> {
    pub name: &'a str,
    pub card_number: &'a str,
    pub expiry_date: &'a str,
    pub cvv: &'a str,
}

impl Values<'_> {
    fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => self.name,
            FieldKey::CardNumber => self.card_number,
            FieldKey::ExpiryDate => self.expiry_date,
            FieldKey::Cvv => self.cvv,
        }
    }
}

/// Current calendar year in local time
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Validate all fields. `current_year` is the full four-digit year.
pub fn validate(values: Values<'_>, current_year: i32) -> ErrorState {
    let mut errors = ErrorState::default();

    for key in FieldKey::ALL {
        if values.get(key).is_empty() {
            errors.set(key, format!("{} is required", key.required_label()));
        }
    }

    if !values.card_number.is_empty() && !is_exact_digits(values.card_number, 16) {
        errors.set(FieldKey::CardNumber, CARD_NUMBER_LENGTH_MESSAGE);
    }

    if !values.cvv.is_empty() && !is_exact_digits(values.cvv, 3) {
        errors.set(FieldKey::Cvv, CVV_LENGTH_MESSAGE);
    }

    if !values.expiry_date.is_empty() && !is_valid_expiry(values.expiry_date, current_year) {
        errors.set(FieldKey::ExpiryDate, EXPIRY_MESSAGE);
    }

    errors
}

fn is_exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// `MM/YY` with a month in 1..=12 and a year no earlier than this year.
/// Only the year is compared, so a past month of the current year passes.
fn is_valid_expiry(value: &str, current_year: i32) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    if !is_exact_digits(month, 2) || !is_exact_digits(year, 2) {
        return false;
    }
    let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<i32>()) else {
        return false;
    };
    (1..=12).contains(&month) && year >= current_year.rem_euclid(100)
}
