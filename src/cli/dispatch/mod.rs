use crate::cli::actions::{check, create, Action};
use crate::cli::commands::{credentials, endpoint, CMD_CHECK, CMD_CREATE};
use anyhow::{anyhow, Result};

/// # Errors
/// Returns an error if required arguments are missing or the signup URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_CREATE, sub_m)) => Ok(Action::Create(create::Args {
            config: endpoint::Options::parse(sub_m)?.into_config()?,
            username: credentials::username(sub_m),
            password: credentials::password(sub_m),
        })),
        Some((CMD_CHECK, sub_m)) => Ok(Action::Check(check::Args {
            password: credentials::password(sub_m),
        })),
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}
