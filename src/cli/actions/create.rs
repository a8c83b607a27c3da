use super::prompt::read_password;
use crate::signup::{FormState, SignupConfig, SignupForm, SubmitOutcome};
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const MSG_USERNAME_REQUIRED: &str = "Username is required";

#[derive(Debug)]
pub struct Args {
    pub config: SignupConfig,
    pub username: String,
    pub password: Option<SecretString>,
}

/// Lines to print for the form's errors, in display order.
#[must_use]
pub fn render(state: &FormState) -> Vec<String> {
    let mut lines = Vec::new();

    if state.username_invalid() {
        lines.push(MSG_USERNAME_REQUIRED.to_string());
    }

    lines.extend(
        state
            .visible_criteria_errors()
            .iter()
            .map(|error| format!("  - {error}")),
    );

    if !state.api_error().is_empty() {
        lines.push(state.api_error().to_string());
    }

    lines
}

/// Drive a signup form with the given credentials and report the result.
/// # Errors
/// Returns an error if the form cannot be built or the user was not created.
#[instrument(skip(args), fields(username = %args.username))]
pub async fn execute(args: Args) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => read_password()?,
    };

    let created = Arc::new(AtomicBool::new(false));
    let signal = Arc::clone(&created);

    let form = SignupForm::new(
        args.config,
        Arc::new(move |value: bool| {
            debug!(created = value, "signup listener notified");
            signal.store(value, Ordering::SeqCst);
        }),
    )?;

    form.input_username(args.username);
    form.input_password(password.expose_secret());

    let outcome = form.submit().await;
    let state = form.state();
    form.teardown();

    if created.load(Ordering::SeqCst) {
        println!("User created");
        return Ok(());
    }

    for line in render(&state) {
        eprintln!("{line}");
    }

    match outcome {
        SubmitOutcome::RejectedLocally => Err(anyhow!("signup rejected: invalid input")),
        SubmitOutcome::Rejected(rejection) => Err(anyhow!("signup rejected: {rejection:?}")),
        SubmitOutcome::Created | SubmitOutcome::Discarded => {
            Err(anyhow!("signup did not complete"))
        }
    }
}
