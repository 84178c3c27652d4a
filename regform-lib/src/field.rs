//! The registration form's fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// One of the four inputs on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

/// How an input accepts and shows its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    /// Rendered masked.
    Password,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 4] = [
        Field::Username,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// The input name carried by change events.
    pub fn name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email address",
            Self::Password | Self::ConfirmPassword => "Password",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Username => "Enter username",
            Self::Email => "Enter email",
            Self::Password => "Enter password",
            Self::ConfirmPassword => "Enter password again",
        }
    }

    pub fn kind(self) -> InputKind {
        match self {
            Self::Username => InputKind::Text,
            Self::Email => InputKind::Email,
            Self::Password | Self::ConfirmPassword => InputKind::Password,
        }
    }

    /// Position of this field in [`Field::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Username => 0,
            Self::Email => 1,
            Self::Password => 2,
            Self::ConfirmPassword => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}
