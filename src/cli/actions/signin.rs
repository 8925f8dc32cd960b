//! Run the sign-in flow against the configured account API.

use crate::api::rest::RestClient;
use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use crate::flows::ui::{LogNavigator, LogNotifier};
use crate::flows::{FlowResult, SigninFlow};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::debug;

/// # Errors
/// Returns an error if the flow does not end in a verified session.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Signin { credentials } = action else {
        return Err(anyhow!("unexpected action"));
    };

    debug!("globals: {:?}", globals);

    let rest = Arc::new(RestClient::new(globals)?);

    let mut flow = SigninFlow::new(
        rest.clone(),
        rest,
        Arc::new(LogNavigator),
        Arc::new(LogNotifier),
    );

    flow.set_email(credentials.email);
    flow.set_password(credentials.password);

    match flow.submit().await {
        FlowResult::Success => {
            println!("Signed in, session is active");
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
