//! Sign-up flow: validate, create the account, chain into sign-in, verify
//! the session.

use crate::api::{AccountService, SessionChecker};
use crate::flows::{
    types::SignupFields,
    ui::{Navigator, Notifier, Route},
    validation, FlowResult, FlowState, MSG_LOGIN_FAILED, MSG_SIGNIN_NEW_ACCOUNT,
    MSG_SIGNUP_FAILED,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Buffered field values for the sign-up form.
#[derive(Clone, Default, PartialEq, Eq)]
struct SignupForm {
    name: String,
    username: String,
    email: String,
    password: String,
}

impl SignupForm {
    fn fields(&self) -> SignupFields {
        SignupFields {
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.username.clear();
        self.email.clear();
        self.password.clear();
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// One sign-up form instance and the submission logic behind it.
///
/// A successful submission performs three external calls in strict order:
/// create the account, sign in with the new credentials, verify the
/// session. Each step is checked before the next one starts.
pub struct SignupFlow {
    account: Arc<dyn AccountService>,
    sessions: Arc<dyn SessionChecker>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    form: SignupForm,
    state: FlowState,
}

impl SignupFlow {
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
            form: SignupForm::default(),
            state: FlowState::Idle,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.username = username.into();
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
    pub const fn state(&self) -> FlowState {
        self.state
    }

    /// Run one submission attempt to completion.
    ///
    /// Collaborator faults are logged and surface as `SubmissionFailed`;
    /// they are never swallowed silently.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> FlowResult {
        self.state = FlowState::Validating;
        let fields = self.form.fields();

        let errors = validation::validate_signup(&fields);
        if !errors.is_empty() {
            debug!(fields = errors.len(), "sign-up rejected by validation");
            self.state = FlowState::Idle;
            return FlowResult::ValidationFailed(errors);
        }

        self.state = FlowState::Submitting;
        let account = match self.account.create_account(&fields).await {
            Ok(account) => account,
            Err(err) => {
                error!("Account creation failed: {err:#}");
                return self.fail(MSG_SIGNUP_FAILED);
            }
        };

        if account.is_none() {
            return self.fail(MSG_SIGNUP_FAILED);
        }

        // The account exists from here on. If the chained sign-in does not
        // produce a session, route the user to the sign-in page instead of
        // letting them retry a creation that would now conflict.
        let session = match self.account.sign_in(&fields.credentials()).await {
            Ok(session) => session,
            Err(err) => {
                error!("Sign in after account creation failed: {err:#}");
                self.navigator.go_to(Route::SignIn);
                return self.fail(MSG_SIGNIN_NEW_ACCOUNT);
            }
        };

        if session.is_none() {
            self.navigator.go_to(Route::SignIn);
            return self.fail(MSG_SIGNIN_NEW_ACCOUNT);
        }

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

impl std::fmt::Debug for SignupFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupFlow")
            .field("form", &self.form)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
