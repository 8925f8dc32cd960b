use anyhow::Result;
use ensaluti::cli::{actions, actions::Action, start, telemetry};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    let result = match action {
        Action::Signin { .. } => actions::signin::execute(action, &globals).await,
        Action::Signup { .. } => actions::signup::execute(action, &globals).await,
    };

    telemetry::shutdown_tracer();

    result
}
