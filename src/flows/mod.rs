//! Flow orchestration: state machine, outcomes and the two flows.

pub mod signin;
pub mod signup;
pub mod types;
pub mod ui;
pub mod validation;

pub use signin::SigninFlow;
pub use signup::SignupFlow;
pub use ui::{Navigator, Notifier, Route};
pub use validation::{Field, FieldErrors};

/// Notice shown when sign-in or session verification fails.
pub const MSG_LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Notice shown when account creation fails.
pub const MSG_SIGNUP_FAILED: &str = "Sign up failed. Please try again.";

/// Notice shown when the account was created but the chained sign-in did
/// not produce a session; the user is routed to the sign-in page.
pub const MSG_SIGNIN_NEW_ACCOUNT: &str = "Something went wrong. Please login to your new account";

/// Where a flow currently is. Observed by the presentation layer to render
/// loading indicators; the flow itself is the only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Nothing in flight; ready for a (re-)submission.
    Idle,
    /// Field constraints are being checked.
    Validating,
    /// Waiting on the account API.
    Submitting,
    /// Waiting on the authoritative session check.
    VerifyingSession,
    /// Navigation was triggered and the form cleared.
    Done,
}

impl FlowState {
    /// True while a submission is in flight and the submit affordance
    /// should stay disabled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting | Self::VerifyingSession)
    }
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult {
    /// Session verified; navigation to home was triggered.
    Success,
    /// Field constraints failed; the account API was never called.
    ValidationFailed(FieldErrors),
    /// The submission was rejected or faulted; the form keeps its values
    /// so the user can retry.
    SubmissionFailed(String),
}
