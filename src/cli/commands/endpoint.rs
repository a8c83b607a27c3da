use crate::signup::SignupConfig;
use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use std::time::Duration;

pub const ARG_SIGNUP_URL: &str = "signup-url";
pub const ARG_AUTH_TOKEN: &str = "auth-token";
pub const ARG_DEBOUNCE_MS: &str = "debounce-ms";

#[derive(Debug, Clone)]
pub struct Options {
    pub signup_url: String,
    pub auth_token: SecretString,
    pub debounce_ms: u64,
}

impl Options {
    /// Parse endpoint arguments from matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing or blank.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let read_required = |id: &str| -> Result<String> {
            matches
                .get_one::<String>(id)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("missing required argument: --{id}"))
        };

        Ok(Self {
            signup_url: read_required(ARG_SIGNUP_URL)?,
            auth_token: SecretString::from(read_required(ARG_AUTH_TOKEN)?),
            debounce_ms: matches
                .get_one::<u64>(ARG_DEBOUNCE_MS)
                .copied()
                .unwrap_or(400),
        })
    }

    /// # Errors
    /// Returns an error if the signup URL is not a valid http(s) URL.
    pub fn into_config(self) -> Result<SignupConfig> {
        Ok(SignupConfig::new(&self.signup_url, self.auth_token)?
            .with_debounce(Duration::from_millis(self.debounce_ms)))
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SIGNUP_URL)
                .long(ARG_SIGNUP_URL)
                .help("Signup endpoint, example: https://api.tld/v1/signup")
                .env("SIGNUP_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_AUTH_TOKEN)
                .long(ARG_AUTH_TOKEN)
                .help("Bearer token sent with the signup request")
                .env("SIGNUP_AUTH_TOKEN")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_DEBOUNCE_MS)
                .long(ARG_DEBOUNCE_MS)
                .help(
                    "Delay in milliseconds before re-validating password edits; \
                     create submits at once and cancels it",
                )
                .default_value("400")
                .env("SIGNUP_DEBOUNCE_MS")
                .value_parser(clap::value_parser!(u64)),
        )
}
