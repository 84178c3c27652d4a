//! Error types

/// Errors raised while driving the form itself.
///
/// Validation failures are not errors; they come back as a
/// [`ValidationResult`](crate::validation::ValidationResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A change event named an input the form does not have.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Errors a [`RegistrationService`](crate::service::RegistrationService) may report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The service refused the registration (e.g. username taken).
    #[error("Registration rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("Registration service unavailable: {0}")]
    Unavailable(String),
}
