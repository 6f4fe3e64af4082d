//! Checkout form state and the record handed to the payment service

use super::field::{FieldKey, FormField};
use super::validation::{self, ErrorState, Values};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// The checkout form: four inputs plus the submit button row
#[derive(Debug, Clone)]
pub struct PaymentForm {
    pub name: FormField,
    pub card_number: FormField,
    pub expiry_date: FormField,
    pub cvv: FormField,
    pub active_field_index: usize,
}

/// Index of the submit button row
const SUBMIT_ROW: usize = 4;

impl PaymentForm {
    pub fn new() -> Self {
        Self {
            name: FormField::new(FieldKey::Name),
            card_number: FormField::new(FieldKey::CardNumber),
            expiry_date: FormField::new(FieldKey::ExpiryDate),
            cvv: FormField::new(FieldKey::Cvv),
            active_field_index: 0,
        }
    }

    pub fn field(&self, key: FieldKey) -> &FormField {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::CardNumber => &self.card_number,
            FieldKey::ExpiryDate => &self.expiry_date,
            FieldKey::Cvv => &self.cvv,
        }
    }

    pub fn field_mut(&mut self, key: FieldKey) -> &mut FormField {
        match key {
            FieldKey::Name => &mut self.name,
            FieldKey::CardNumber => &mut self.card_number,
            FieldKey::ExpiryDate => &mut self.expiry_date,
            FieldKey::Cvv => &mut self.cvv,
        }
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == SUBMIT_ROW
    }

    /// Key of the focused input, if an input has focus
    pub fn active_key(&self) -> Option<FieldKey> {
        FieldKey::ALL.get(self.active_field_index).copied()
    }

    /// Route a typed character to the focused input
    pub fn input_char(&mut self, c: char) -> bool {
        self.get_active_field_mut()
            .is_some_and(|field| field.push_char(c))
    }

    /// Route pasted text to the focused input
    pub fn input_str(&mut self, text: &str) -> bool {
        self.get_active_field_mut()
            .is_some_and(|field| field.push_str(text))
    }

    pub fn backspace(&mut self) -> bool {
        self.get_active_field_mut()
            .is_some_and(|field| field.pop_char())
    }

    pub fn values(&self) -> Values<'_> {
        Values {
            name: self.name.value(),
            card_number: self.card_number.value(),
            expiry_date: self.expiry_date.value(),
            cvv: self.cvv.value(),
        }
    }

    /// Run the submission validator against the current values
    pub fn validate(&self, current_year: i32) -> ErrorState {
        validation::validate(self.values(), current_year)
    }

    /// Validate and, when every rule passes, produce the payment record.
    pub fn try_record(&self, current_year: i32) -> Result<PaymentRecord, ErrorState> {
        let errors = self.validate(current_year);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PaymentRecord {
            name: self.name.value().to_string(),
            card_number: self.card_number.value().to_string(),
            expiry_date: self.expiry_date.value().to_string(),
            cvv: self.cvv.value().to_string(),
        })
    }
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PaymentForm {
    fn field_count(&self) -> usize {
        5 // name, card number, expiry, cvv, submit
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let key = self.active_key()?;
        Some(self.field_mut(key))
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        FieldKey::ALL.get(index).map(|key| self.field(*key))
    }
}

/// Validated card details handed to the payment service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub name: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentRecord {
    /// Last four digits of the card number
    pub fn last_four(&self) -> &str {
        let start = self.card_number.len().saturating_sub(4);
        &self.card_number[start..]
    }
}

// Card number and CVV never reach logs through Debug
impl fmt::Debug for PaymentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentRecord")
            .field("name", &self.name)
            .field("card_number", &format_args!("****{}", self.last_four()))
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .finish()
    }
}
