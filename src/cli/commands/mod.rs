pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

fn signin_command() -> Command {
    Command::new("signin")
        .about("Sign in to an existing account")
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email")
                .env("ENSALUTI_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .help("Account password")
                .env("ENSALUTI_PASSWORD")
                .required(true),
        )
}

fn signup_command() -> Command {
    Command::new("signup")
        .about("Create a new account and sign in to it")
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Display name")
                .env("ENSALUTI_NAME")
                .required(true),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .help("Unique username")
                .env("ENSALUTI_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .help("Account email")
                .env("ENSALUTI_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .help("Account password")
                .env("ENSALUTI_PASSWORD")
                .required(true),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("ensaluti")
        .about("Sign-in and sign-up flows for the social web client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the account API, example: https://api.example.com")
                .env("ENSALUTI_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .help("API key sent with every request")
                .env("ENSALUTI_API_KEY")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("30")
                .env("ENSALUTI_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .subcommand(signin_command())
        .subcommand(signup_command());

    logging::with_args(command)
}
