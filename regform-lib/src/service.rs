//! Registration service seam.
//!
//! An accepted form is handed to a [`RegistrationService`]. The only
//! implementation here logs the registration; a networked backend would slot
//! in behind the same trait.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::RegistrationError;
use crate::field::Field;
use crate::state::{FormState, mask};

/// Data from a form that passed validation.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Extract the payload from a validated state.
    ///
    /// Returns `None` if a required field is absent, which cannot happen for a
    /// state that passed the registration schema.
    pub(crate) fn from_validated(state: &FormState) -> Option<Self> {
        Some(Self {
            username: state.get(Field::Username)?.to_string(),
            email: state.get(Field::Email)?.to_string(),
            password: state.get(Field::Password)?.to_string(),
        })
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &mask(&self.password))
            .finish()
    }
}

/// Receives accepted registrations.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<(), RegistrationError>;
}

/// Logs each registration and accepts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingRegistrationService;

#[async_trait]
impl RegistrationService for LoggingRegistrationService {
    async fn register(&self, registration: &Registration) -> Result<(), RegistrationError> {
        // TODO: POST the registration once a backend endpoint exists.
        log::info!(
            "registration accepted for {} <{}>",
            registration.username,
            registration.email
        );
        Ok(())
    }
}
