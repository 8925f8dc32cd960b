//! Run the sign-up flow against the configured account API.

use crate::api::rest::RestClient;
use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use crate::flows::ui::{LogNavigator, LogNotifier};
use crate::flows::{FlowResult, SignupFlow};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::debug;

/// # Errors
/// Returns an error if the flow does not end in a verified session.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Signup { fields } = action else {
        return Err(anyhow!("unexpected action"));
    };

    debug!("globals: {:?}", globals);

    let rest = Arc::new(RestClient::new(globals)?);

    let mut flow = SignupFlow::new(
        rest.clone(),
        rest,
        Arc::new(LogNavigator),
        Arc::new(LogNotifier),
    );

    flow.set_name(fields.name);
    flow.set_username(fields.username);
    flow.set_email(fields.email);
    flow.set_password(fields.password);

    match flow.submit().await {
        FlowResult::Success => {
            println!("Account created, session is active");
            Ok(())
        }
        FlowResult::ValidationFailed(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            Err(anyhow!("validation failed"))
        }
        FlowResult::SubmissionFailed(message) => Err(anyhow!(message)),
    }
}
