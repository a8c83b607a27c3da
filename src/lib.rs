//! # signup-form
//!
//! Client side of a username/password signup flow. The crate owns the form
//! logic a user interface needs and nothing about how the form is drawn.
//!
//! ## Password Criteria
//!
//! Passwords are checked locally against six rules (length between 10 and 24,
//! no whitespace, at least one digit, one uppercase and one lowercase letter)
//! before anything is sent. The same rules come back from the signup service
//! as error codes on `422 Unprocessable Entity`, and both paths produce the
//! same user-facing messages.
//!
//! ## Form Lifecycle
//!
//! - **Editing:** every password edit restarts a 400 ms debounce timer; only
//!   the last edit of a burst is validated.
//! - **Submitting:** submit validates synchronously, then issues exactly one
//!   `POST` with a bearer token. Responses are classified into a single
//!   API error message and/or per-rule criteria errors.
//! - **Teardown:** dropping the form cancels the timer and ignores any
//!   response still in flight.
//!
//! The signup URL and token are injected through [`signup::SignupConfig`];
//! nothing secret is compiled in.

pub mod cli;
pub mod signup;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
