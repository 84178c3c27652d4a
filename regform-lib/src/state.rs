//! Accumulated field state.

use std::fmt;

use serde::Serialize;

use crate::error::FormError;
use crate::field::Field;

/// A single input change: the field that changed and its full new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: Field,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Current text of each input.
///
/// `None` means the user never typed into that input, which the validator
/// reports as "required". An input that was typed into and then cleared holds
/// `Some("")`.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirm_password: Option<String>,
}

impl FormState {
    /// Create an empty state with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this state with `field` replaced by `value`.
    pub fn update(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = Some(value.into());
        next
    }

    /// Reducer form of [`update`](Self::update).
    pub fn apply(mut self, change: FieldChange) -> Self {
        *self.slot_mut(change.field) = Some(change.value);
        self
    }

    /// Update a field identified by its input name.
    pub fn reduce_named(&self, name: &str, value: impl Into<String>) -> Result<Self, FormError> {
        let field = name.parse::<Field>()?;
        Ok(self.update(field, value))
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Username => self.username.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Password => self.password.as_deref(),
            Field::ConfirmPassword => self.confirm_password.as_deref(),
        }
    }

    /// True if no input has been typed into yet.
    pub fn is_pristine(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_none())
    }

    /// JSON dump of the state with passwords masked, for diagnostics.
    pub fn redacted_json(&self) -> String {
        let mut masked = self.clone();
        for field in [Field::Password, Field::ConfirmPassword] {
            if let Some(value) = masked.slot_mut(field) {
                *value = mask(value);
            }
        }
        serde_json::to_string(&masked).unwrap_or_else(|_| "{}".to_string())
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_deref().map(mask))
            .field("confirm_password", &self.confirm_password.as_deref().map(mask))
            .finish()
    }
}

/// Replace every character with `*`.
pub(crate) fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}
