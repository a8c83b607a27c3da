use super::prompt::read_password;
use crate::signup::criteria;
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub password: Option<SecretString>,
}

/// Validate a password locally and print every violated criterion.
/// # Errors
/// Returns an error if the password cannot be read or breaks any criterion.
pub fn execute(args: &Args) -> Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_password()?,
    };

    let errors = criteria::validate(password.expose_secret());
    debug!(violations = errors.len(), "password checked");

    if errors.is_empty() {
        println!("Password meets all criteria");
        return Ok(());
    }

    for error in &errors {
        println!("  - {error}");
    }

    Err(anyhow!("password does not meet {} criteria", errors.len()))
}
