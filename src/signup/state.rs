//! Form state and the named transitions that mutate it.
//!
//! Fields are private: the only way to change a [`FormState`] is to
//! [`FormState::apply`] a [`Transition`].

use std::fmt;
use tracing::trace;

/// Where the form is in the submit state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    ServerError,
    NetworkError,
    RejectedLocally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    SetUsername(String),
    SetPassword(String),
    SetCriteriaErrors(Vec<String>),
    SetApiError(String),
    SetPasswordTouched(bool),
    SetSubmitAttempted(bool),
    SetPhase(SubmitPhase),
}

impl Transition {
    fn name(&self) -> &'static str {
        match self {
            Self::SetUsername(_) => "set_username",
            Self::SetPassword(_) => "set_password",
            Self::SetCriteriaErrors(_) => "set_criteria_errors",
            Self::SetApiError(_) => "set_api_error",
            Self::SetPasswordTouched(_) => "set_password_touched",
            Self::SetSubmitAttempted(_) => "set_submit_attempted",
            Self::SetPhase(_) => "set_phase",
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormState {
    username: String,
    password: String,
    criteria_errors: Vec<String>,
    api_error: String,
    password_touched: bool,
    submit_attempted: bool,
    phase: SubmitPhase,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, transition: Transition) {
        trace!(transition = transition.name(), "form transition");

        match transition {
            Transition::SetUsername(username) => self.username = username,
            Transition::SetPassword(password) => self.password = password,
            Transition::SetCriteriaErrors(errors) => self.criteria_errors = errors,
            Transition::SetApiError(message) => self.api_error = message,
            Transition::SetPasswordTouched(touched) => self.password_touched = touched,
            Transition::SetSubmitAttempted(attempted) => self.submit_attempted = attempted,
            Transition::SetPhase(phase) => self.phase = phase,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Current criteria errors, whether or not they are visible yet.
    #[must_use]
    pub fn criteria_errors(&self) -> &[String] {
        &self.criteria_errors
    }

    #[must_use]
    pub fn api_error(&self) -> &str {
        &self.api_error
    }

    #[must_use]
    pub fn password_touched(&self) -> bool {
        self.password_touched
    }

    #[must_use]
    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Criteria errors to render: hidden until the password was edited or a
    /// submit was attempted.
    #[must_use]
    pub fn visible_criteria_errors(&self) -> &[String] {
        if self.password_touched || self.submit_attempted {
            &self.criteria_errors
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn username_invalid(&self) -> bool {
        self.submit_attempted && self.username.is_empty()
    }

    #[must_use]
    pub fn password_invalid(&self) -> bool {
        !self.criteria_errors.is_empty()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("username", &self.username)
            .field("password", &"***")
            .field("criteria_errors", &self.criteria_errors)
            .field("api_error", &self.api_error)
            .field("password_touched", &self.password_touched)
            .field("submit_attempted", &self.submit_attempted)
            .field("phase", &self.phase)
            .finish()
    }
}
