use std::collections::BTreeMap;
use std::fmt;

use crate::field::Field;

/// Which constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was never filled in.
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    /// The value does not have the expected shape (e.g. not an email address).
    InvalidFormat,
    /// A cross-field equality check failed.
    Mismatch,
}

impl ErrorKind {
    /// Message used when a rule is declared without one.
    pub fn default_message(self) -> String {
        match self {
            Self::Required => "Required".to_string(),
            Self::TooShort { min } => format!("String must contain at least {} character(s)", min),
            Self::TooLong { max } => format!("String must contain at most {} character(s)", max),
            Self::InvalidFormat => "Invalid email".to_string(),
            Self::Mismatch => "Values do not match".to_string(),
        }
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub field: Field,
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// At most one error per field.
///
/// Inserting a second issue for the same field replaces the first, so when
/// issues are folded in evaluation order the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, Issue>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue, replacing any earlier one for the same field.
    pub fn insert(&mut self, issue: Issue) {
        self.errors.insert(issue.field, issue);
    }

    /// Error message for a field, if it has one.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(|issue| issue.message.as_str())
    }

    pub fn kind(&self, field: Field) -> Option<ErrorKind> {
        self.errors.get(&field).map(|issue| issue.kind)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Retained issues in form order.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.errors.values()
    }

    /// The first field in form order that has an error.
    pub fn first_field(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl FromIterator<Issue> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        let mut errors = Self::new();
        for issue in iter {
            errors.insert(issue);
        }
        errors
    }
}

/// Result of validating a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every constraint held.
    #[default]
    Valid,
    /// One or more fields failed. Never empty.
    Invalid(FieldErrors),
}

impl ValidationResult {
    /// Fold issues, in evaluation order, into a result.
    pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        let errors: FieldErrors = issues.into_iter().collect();
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Errors by field; empty when valid.
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Valid => FieldErrors::new(),
            Self::Invalid(errors) => errors.clone(),
        }
    }

    /// Error message for a single field.
    pub fn error(&self, field: Field) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => errors.get(field),
        }
    }

    pub fn kind(&self, field: Field) -> Option<ErrorKind> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => errors.kind(field),
        }
    }

    /// The first invalid field in form order (for focusing).
    pub fn first_invalid_field(&self) -> Option<Field> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => errors.first_field(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(field: Field, kind: ErrorKind, message: &str) -> Issue {
        Issue {
            field,
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_later_issue_overwrites_earlier() {
        let errors: FieldErrors = [
            issue(Field::ConfirmPassword, ErrorKind::TooShort { min: 6 }, "short"),
            issue(Field::ConfirmPassword, ErrorKind::Mismatch, "mismatch"),
        ]
        .into_iter()
        .collect();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::ConfirmPassword), Some("mismatch"));
        assert_eq!(errors.kind(Field::ConfirmPassword), Some(ErrorKind::Mismatch));
    }

    #[test]
    fn test_no_issues_is_valid() {
        let result = ValidationResult::from_issues(Vec::new());
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert_eq!(result.first_invalid_field(), None);
    }

    #[test]
    fn test_first_invalid_field_uses_form_order() {
        let result = ValidationResult::from_issues([
            issue(Field::Password, ErrorKind::Required, "Password is required"),
            issue(Field::Email, ErrorKind::InvalidFormat, "Invalid email"),
        ]);
        assert!(result.is_invalid());
        assert_eq!(result.first_invalid_field(), Some(Field::Email));
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(
            ErrorKind::TooShort { min: 3 }.default_message(),
            "String must contain at least 3 character(s)"
        );
        assert_eq!(
            ErrorKind::TooLong { max: 20 }.default_message(),
            "String must contain at most 20 character(s)"
        );
    }
}
