//! Explicit per-input validation.
//!
//! Each submission type gets a plain function returning a structured error
//! set; nothing here is schema-driven. The messages are the exact literals
//! the presentation layer renders inline next to each field.

use crate::flows::types::{Credentials, SignupFields};
use regex::Regex;
use std::collections::BTreeMap;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_USERNAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 8;

pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
pub const MSG_USERNAME_TOO_SHORT: &str = "Username must be at least 2 characters.";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";

/// Form field an error message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Username,
    Email,
    Password,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
        };
        write!(f, "{name}")
    }
}

/// Per-field error messages, ordered for stable rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Validate a sign-in submission.
#[must_use]
pub fn validate_signin(credentials: &Credentials) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if !valid_email(&credentials.email) {
        errors.insert(Field::Email, MSG_INVALID_EMAIL);
    }

    if !valid_password(&credentials.password) {
        errors.insert(Field::Password, MSG_PASSWORD_TOO_SHORT);
    }

    errors
}

/// Validate a sign-up submission.
#[must_use]
pub fn validate_signup(fields: &SignupFields) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if fields.name.chars().count() < MIN_NAME_LEN {
        errors.insert(Field::Name, MSG_NAME_TOO_SHORT);
    }

    if fields.username.chars().count() < MIN_USERNAME_LEN {
        errors.insert(Field::Username, MSG_USERNAME_TOO_SHORT);
    }

    if !valid_email(&fields.email) {
        errors.insert(Field::Email, MSG_INVALID_EMAIL);
    }

    if !valid_password(&fields.password) {
        errors.insert(Field::Password, MSG_PASSWORD_TOO_SHORT);
    }

    errors
}
