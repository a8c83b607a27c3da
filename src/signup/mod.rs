//! Signup form logic: password criteria, debounced re-validation, the
//! submit state machine and the HTTP client behind it.

pub mod client;
pub mod config;
pub mod criteria;
pub mod debounce;
pub mod form;
pub mod response;
pub mod state;

pub use self::client::{SignupClient, SignupReply};
pub use self::config::SignupConfig;
pub use self::criteria::{validate, Criterion};
pub use self::debounce::Debouncer;
pub use self::form::{SignupForm, SignupListener, SubmitOutcome};
pub use self::response::{classify, Rejection, Verdict};
pub use self::state::{FormState, SubmitPhase, Transition};
