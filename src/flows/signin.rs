//! Sign-in flow: validate, submit credentials, verify the session.

use crate::api::{AccountService, SessionChecker};
use crate::flows::{
    types::Credentials,
    ui::{Navigator, Notifier, Route},
    validation, FlowResult, FlowState, MSG_LOGIN_FAILED,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Buffered field values for the sign-in form.
#[derive(Clone, Default, PartialEq, Eq)]
struct SigninForm {
    email: String,
    password: String,
}

impl SigninForm {
    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

impl std::fmt::Debug for SigninForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninForm")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// One sign-in form instance and the submission logic behind it.
pub struct SigninFlow {
    account: Arc<dyn AccountService>,
    sessions: Arc<dyn SessionChecker>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    form: SigninForm,
    state: FlowState,
}

impl SigninFlow {
    #[must_use]
    pub fn new(
        account: Arc<dyn AccountService>,
        sessions: Arc<dyn SessionChecker>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            account,
            sessions,
            navigator,
            notifier,
            form: SigninForm::default(),
            state: FlowState::Idle,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.form.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.form.password
    }

    #[must_use]
    pub const fn state(&self) -> FlowState {
        self.state
    }

    /// Run one submission attempt to completion.
    ///
    /// The exclusive borrow keeps at most one submission in flight per
    /// flow instance. On failure the form keeps its values for a retry;
    /// on success it is cleared and navigation to home is triggered.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> FlowResult {
        self.state = FlowState::Validating;
        let credentials = self.form.credentials();

        let errors = validation::validate_signin(&credentials);
        if !errors.is_empty() {
            debug!(fields = errors.len(), "sign-in rejected by validation");
            self.state = FlowState::Idle;
            return FlowResult::ValidationFailed(errors);
        }

        self.state = FlowState::Submitting;
        let session = match self.account.sign_in(&credentials).await {
            Ok(session) => session,
            Err(err) => {
                error!("Sign in failed: {err:#}");
                return self.fail(MSG_LOGIN_FAILED);
            }
        };

        if session.is_none() {
            return self.fail(MSG_LOGIN_FAILED);
        }

        // The raw sign-in result is not authoritative; the session check is.
        self.state = FlowState::VerifyingSession;
        if self.sessions.is_authenticated().await {
            self.form.reset();
            self.navigator.go_to(Route::Home);
            self.state = FlowState::Done;
            FlowResult::Success
        } else {
            self.fail(MSG_LOGIN_FAILED)
        }
    }

    fn fail(&mut self, message: &str) -> FlowResult {
        self.notifier.show(message);
        self.state = FlowState::Idle;
        FlowResult::SubmissionFailed(message.to_string())
    }
}

impl std::fmt::Debug for SigninFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninFlow")
            .field("form", &self.form)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
