//! Wire and domain types shared by both flows.

use serde::{Deserialize, Serialize};

/// Email + password pair submitted to the sessions endpoint.
///
/// Built fresh from the form buffer for every submission attempt and
/// discarded afterwards.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Full field set submitted to the users endpoint when creating an account.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SignupFields {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupFields {
    /// Credentials for the sign-in that follows account creation, name and
    /// username dropped.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl std::fmt::Debug for SignupFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupFields")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Opaque account returned by the backend on successful creation. Only its
/// existence is consumed by the flows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
}

/// Opaque session handle returned by the backend on successful sign-in.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"***").finish()
    }
}
