use super::result::ErrorKind;
use super::schema::Schema;
use crate::field::Field;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 20;

/// Rules for the registration form.
#[rustfmt::skip]
pub fn registration_schema() -> Schema {
    Schema::new()
        .field(Field::Username)
            .required("Username is required")
            .min_length(USERNAME_MIN)
            .max_length(USERNAME_MAX)
        .field(Field::Email)
            .required("Email is required")
            .email()
        .field(Field::Password)
            .required("Password is required")
            .min_length(PASSWORD_MIN)
            .max_length(PASSWORD_MAX)
        .field(Field::ConfirmPassword)
            .min_length(PASSWORD_MIN)
            .max_length(PASSWORD_MAX)
        .refine(
            Field::ConfirmPassword,
            &[Field::Password, Field::ConfirmPassword],
            ErrorKind::Mismatch,
            |state| state.get(Field::Password) == state.get(Field::ConfirmPassword),
            "Passwords do not match",
        )
}
