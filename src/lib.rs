//! # Ensaluti (Sign-in & Sign-up Flows)
//!
//! `ensaluti` implements the authentication flows of the social web client:
//! collecting credentials, validating them, submitting them to the account
//! API, and verifying the resulting session before the user is sent home.
//!
//! ## Flows
//!
//! - [`flows::SigninFlow`]: email + password, sign in, verify the session.
//! - [`flows::SignupFlow`]: name + username + email + password, create the
//!   account, chain into sign-in, verify the session.
//!
//! Both flows run their external calls strictly in order and expose an
//! explicit [`flows::FlowState`] so a presentation layer can render loading
//! indicators without owning any of the logic. Session verification is
//! authoritative: a sign-in that returns a session but fails
//! `is_authenticated` is still a failure.
//!
//! ## Collaborators
//!
//! The flows only know four narrow contracts: [`api::AccountService`],
//! [`api::SessionChecker`], [`flows::Navigator`] and [`flows::Notifier`].
//! [`api::rest::RestClient`] talks to the backend API over HTTP;
//! [`api::memory::MemoryDirectory`] keeps everything in memory for tests
//! and offline use.

pub mod api;
pub mod cli;
pub mod flows;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }

        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );

        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent() {
        assert!(APP_USER_AGENT.starts_with("ensaluti/"));
    }
}
