use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn with_username(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_USERNAME)
            .short('u')
            .long(ARG_USERNAME)
            .help("Username to register")
            .env("SIGNUP_USERNAME")
            .required(true),
    )
}

#[must_use]
pub fn with_password(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_PASSWORD)
            .long(ARG_PASSWORD)
            .help("Password, read from stdin when omitted")
            .env("SIGNUP_PASSWORD")
            .hide_env_values(true),
    )
}

#[must_use]
pub fn username(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>(ARG_USERNAME)
        .cloned()
        .unwrap_or_default()
}

#[must_use]
pub fn password(matches: &ArgMatches) -> Option<SecretString> {
    matches
        .get_one::<String>(ARG_PASSWORD)
        .cloned()
        .map(SecretString::from)
}
