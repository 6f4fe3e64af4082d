//! Form field value objects

use super::filter;

/// Identifies one of the checkout inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Name,
    CardNumber,
    ExpiryDate,
    Cvv,
}

impl FieldKey {
    /// All keys in display order
    pub const ALL: [FieldKey; 4] = [
        FieldKey::Name,
        FieldKey::CardNumber,
        FieldKey::ExpiryDate,
        FieldKey::Cvv,
    ];

    /// Identifier used in the payment record and the filter table
    pub fn id(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CardNumber => "cardNumber",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
        }
    }

    /// Label shown on the input border
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name on Card",
            Self::CardNumber => "Card Number",
            Self::ExpiryDate => "Expiry Date (MM/YY)",
            Self::Cvv => "CVV",
        }
    }

    /// Subject of the "is required" message
    pub fn required_label(&self) -> &'static str {
        match self {
            Self::Name => "Name on card",
            Self::CardNumber => "Card number",
            Self::ExpiryDate => "Expiry date",
            Self::Cvv => "CVV",
        }
    }

    /// Longest value the input will hold, if capped
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Self::Name => None,
            Self::CardNumber => Some(16),
            Self::ExpiryDate => Some(5),
            Self::Cvv => Some(3),
        }
    }

    /// Whether the value should be masked on screen
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Cvv)
    }
}

/// A single checkout input and its current value.
///
/// The value only changes through [`FormField::propose`], so it always
/// satisfies the keystroke filter for its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: FieldKey,
    value: String,
}

impl FormField {
    /// Create an empty field
    pub fn new(key: FieldKey) -> Self {
        Self {
            key,
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value if the filter accepts it.
    /// Returns false (and leaves the value untouched) on rejection.
    pub fn propose(&mut self, proposed: String) -> bool {
        if !filter::accepts(self.key, &proposed) {
            tracing::trace!(field = self.key.id(), "dropped rejected input");
            return false;
        }
        self.value = proposed;
        true
    }

    /// Append a typed character
    pub fn push_char(&mut self, c: char) -> bool {
        let mut proposed = self.value.clone();
        proposed.push(c);
        self.propose(proposed)
    }

    /// Append pasted text as a single edit.
    /// Text past the field's length cap is cut off before filtering.
    pub fn push_str(&mut self, text: &str) -> bool {
        let room = match self.key.max_len() {
            Some(max) => max.saturating_sub(self.value.chars().count()),
            None => usize::MAX,
        };
        if room == 0 || text.is_empty() {
            return false;
        }
        let mut proposed = self.value.clone();
        proposed.extend(text.chars().take(room));
        self.propose(proposed)
    }

    /// Remove the last character
    pub fn pop_char(&mut self) -> bool {
        let mut proposed = self.value.clone();
        if proposed.pop().is_none() {
            return false;
        }
        self.propose(proposed)
    }

    /// Get the display value for rendering
    pub fn display_value(&self, mask_secrets: bool) -> String {
        if mask_secrets && self.key.is_secret() {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}
