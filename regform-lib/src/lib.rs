//! Registration form model and validation.
//!
//! Holds the typed state of a four-field registration form, the schema that
//! validates it on submit, and the submission state machine that decides
//! which errors are on display.

pub mod error;
pub mod field;
pub mod service;
pub mod state;
pub mod submission;
pub mod validation;

pub use error::{FormError, RegistrationError};
pub use field::{Field, InputKind};
pub use service::{LoggingRegistrationService, Registration, RegistrationService};
pub use state::{FieldChange, FormState};
pub use submission::{RegistrationForm, SubmissionPhase, SubmitOutcome};
pub use validation::{ErrorKind, FieldErrors, Issue, Schema, ValidationResult, registration_schema};
