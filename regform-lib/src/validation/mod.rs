//! Form validation.
//!
//! A [`Schema`] declares per-field rules and cross-field refinements, and
//! evaluates them against a [`FormState`](crate::state::FormState) as a pure
//! function.
//!
//! # Example
//!
//! ```
//! use regform_lib::{Field, FormState, registration_schema};
//!
//! let state = FormState::new()
//!     .update(Field::Username, "alice")
//!     .update(Field::Email, "alice@x.com")
//!     .update(Field::Password, "secret1")
//!     .update(Field::ConfirmPassword, "secret1");
//!
//! assert!(registration_schema().validate(&state).is_valid());
//! ```

mod registration;
mod result;
mod schema;

pub use registration::registration_schema;
pub use result::{ErrorKind, FieldErrors, Issue, ValidationResult};
pub use schema::{FieldBuilder, Schema};
