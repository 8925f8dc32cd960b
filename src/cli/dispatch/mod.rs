//! Map parsed command-line matches to an action plus its configuration.

use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use crate::flows::types::{Credentials, SignupFields};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is
/// unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let mut globals = GlobalArgs::new(required(matches, "api-url")?);

    globals.api_key = matches
        .get_one::<String>("api-key")
        .map(|key| SecretString::from(key.clone()));

    globals.timeout = matches.get_one::<u64>("timeout").copied().unwrap_or(30);

    match matches.subcommand() {
        Some(("signin", sub)) => {
            let credentials = Credentials {
                email: required(sub, "email")?,
                password: required(sub, "password")?,
            };
            Ok((Action::Signin { credentials }, globals))
        }
        Some(("signup", sub)) => {
            let fields = SignupFields {
                name: required(sub, "name")?,
                username: required(sub, "username")?,
                email: required(sub, "email")?,
                password: required(sub, "password")?,
            };
            Ok((Action::Signup { fields }, globals))
        }
        _ => Err(anyhow!("missing subcommand")),
    }
}
