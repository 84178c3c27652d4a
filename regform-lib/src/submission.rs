//! Submission state machine.
//!
//! ```text
//! Idle --submit--> Validating --valid--> Accepted
//!                             --invalid--> Rejected
//! ```
//!
//! The whole cycle runs synchronously inside [`RegistrationForm::submit`];
//! `Validating` is never observable from outside.

use crate::field::Field;
use crate::service::Registration;
use crate::state::FormState;
use crate::validation::{
    ErrorKind, FieldErrors, Issue, Schema, ValidationResult, registration_schema,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Accepted,
    Rejected,
}

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form validated; hand the payload to a registration service.
    Accepted(Registration),
    /// The form failed validation; these errors are now on display.
    Rejected(FieldErrors),
}

/// A registration form instance: current input, displayed errors, phase.
pub struct RegistrationForm {
    state: FormState,
    errors: FieldErrors,
    phase: SubmissionPhase,
    schema: Schema,
}

impl RegistrationForm {
    /// Create a form using the standard registration rules.
    pub fn new() -> Self {
        Self::with_schema(registration_schema())
    }

    /// Create a form using custom rules.
    ///
    /// An accepted submission still has to produce a [`Registration`], so a
    /// schema that leaves username, email, or password unchecked does not
    /// let them through absent: they are rejected as `Required` with the
    /// default message.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            state: FormState::new(),
            errors: FieldErrors::new(),
            phase: SubmissionPhase::Idle,
            schema,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Errors currently on display.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Record new text for a field. Does not validate.
    pub fn on_change(&mut self, field: Field, value: impl Into<String>) {
        self.state = self.state.update(field, value);
    }

    /// Validate the current state and update the displayed errors.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.phase = SubmissionPhase::Validating;
        log::debug!("formData {}", self.state.redacted_json());

        let result = self.schema.validate(&self.state);
        let registration = match &result {
            ValidationResult::Valid => Registration::from_validated(&self.state),
            ValidationResult::Invalid(_) => None,
        };

        match (result, registration) {
            (ValidationResult::Valid, Some(registration)) => {
                self.errors.clear();
                self.phase = SubmissionPhase::Accepted;
                log::debug!("submission accepted");
                SubmitOutcome::Accepted(registration)
            }
            (ValidationResult::Invalid(errors), _) => self.reject(errors),
            (ValidationResult::Valid, None) => {
                // A custom schema let an absent field through.
                let errors = Field::ALL
                    .into_iter()
                    .filter(|f| self.state.get(*f).is_none())
                    .map(|field| Issue {
                        field,
                        kind: ErrorKind::Required,
                        message: ErrorKind::Required.default_message(),
                    })
                    .collect();
                self.reject(errors)
            }
        }
    }

    /// Discard all input and errors.
    pub fn reset(&mut self) {
        self.state = FormState::new();
        self.errors.clear();
        self.phase = SubmissionPhase::Idle;
    }

    fn reject(&mut self, errors: FieldErrors) -> SubmitOutcome {
        log::debug!("submission rejected with {} field error(s)", errors.len());
        self.errors = errors.clone();
        self.phase = SubmissionPhase::Rejected;
        SubmitOutcome::Rejected(errors)
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut RegistrationForm, username: &str, email: &str, pw: &str, confirm: &str) {
        form.on_change(Field::Username, username);
        form.on_change(Field::Email, email);
        form.on_change(Field::Password, pw);
        form.on_change(Field::ConfirmPassword, confirm);
    }

    #[test]
    fn test_starts_idle() {
        let form = RegistrationForm::new();
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(form.errors().is_empty());
        assert!(form.state().is_pristine());
    }

    #[test]
    fn test_on_change_does_not_validate() {
        let mut form = RegistrationForm::new();
        form.on_change(Field::Username, "a");
        assert!(form.errors().is_empty());
        assert_eq!(form.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_rejected_then_accepted_clears_errors() {
        let mut form = RegistrationForm::new();

        let outcome = form.submit();
        assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.len() == 4));
        assert_eq!(form.phase(), SubmissionPhase::Rejected);
        assert_eq!(form.error(Field::Username), Some("Username is required"));

        fill(&mut form, "alice", "alice@x.com", "secret1", "secret1");
        // Errors stay on display until the next submit.
        assert_eq!(form.errors().len(), 4);

        let outcome = form.submit();
        assert_eq!(form.phase(), SubmissionPhase::Accepted);
        assert!(form.errors().is_empty());
        match outcome {
            SubmitOutcome::Accepted(registration) => {
                assert_eq!(registration.username, "alice");
                assert_eq!(registration.email, "alice@x.com");
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_rejection_replaces_previous_errors() {
        let mut form = RegistrationForm::new();
        form.submit();

        fill(&mut form, "alice", "alice@x.com", "secret1", "secret2");
        form.submit();

        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().kind(Field::ConfirmPassword), Some(ErrorKind::Mismatch));
    }

    #[test]
    fn test_reset() {
        let mut form = RegistrationForm::new();
        form.on_change(Field::Email, "bad");
        form.submit();
        form.reset();

        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(form.errors().is_empty());
        assert!(form.state().is_pristine());
    }

    #[test]
    fn test_permissive_schema_still_needs_payload_fields() {
        let schema = Schema::new().field(Field::Username).build();
        let mut form = RegistrationForm::with_schema(schema);
        form.on_change(Field::Username, "alice");

        let outcome = form.submit();
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(form.errors().kind(Field::Email), Some(ErrorKind::Required));
        assert!(!form.errors().contains(Field::Username));
    }
}
