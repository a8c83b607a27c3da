//! The signup form component.
//!
//! [`SignupForm`] owns a [`FormState`], a debounce timer for password edits,
//! and a [`SignupClient`]. Front-ends call the `input_*` methods on every
//! edit, [`SignupForm::submit`] on an explicit submit, and read back a
//! snapshot with [`SignupForm::state`].
//!
//! Every submit takes a ticket. Only the latest ticket may write an error
//! response into the state, so a slow reply to an earlier submit cannot
//! overwrite a newer one. A successful reply is always honoured because the
//! account exists at that point.

use super::client::SignupClient;
use super::config::SignupConfig;
use super::criteria;
use super::debounce::Debouncer;
use super::response::{classify, Rejection, Verdict};
use super::state::{FormState, SubmitPhase, Transition};
use anyhow::Result;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, error, info, info_span, Instrument};
use ulid::Ulid;

/// Receives the "user created" signal. Any `Fn(bool)` closure qualifies.
pub trait SignupListener: Send + Sync {
    fn user_created(&self, created: bool);
}

impl<F> SignupListener for F
where
    F: Fn(bool) + Send + Sync,
{
    fn user_created(&self, created: bool) {
        self(created);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty username or password rule violations; nothing was sent.
    RejectedLocally,
    Created,
    Rejected(Rejection),
    /// The reply arrived after a newer submit or after teardown and was ignored.
    Discarded,
}

struct Shared {
    state: Mutex<FormState>,
    client: SignupClient,
    listener: Arc<dyn SignupListener>,
    ticket: AtomicU64,
    created: AtomicBool,
    torn_down: AtomicBool,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.ticket.load(Ordering::SeqCst) == ticket
    }

    /// Debounce callback: validate whatever the password is now.
    fn revalidate(&self) {
        if self.is_torn_down() {
            return;
        }

        let mut state = self.state();
        if !state.password_touched() {
            return;
        }

        let errors = criteria::validate(state.password());
        debug!(violations = errors.len(), "debounced password validation");
        state.apply(Transition::SetCriteriaErrors(errors));
    }

    fn settle(&self, ticket: u64, verdict: Verdict) -> SubmitOutcome {
        if self.is_torn_down() {
            debug!(ticket, "signup response after teardown ignored");
            return SubmitOutcome::Discarded;
        }

        match verdict {
            Verdict::Created => {
                if self.is_current(ticket) {
                    self.state()
                        .apply(Transition::SetPhase(SubmitPhase::Succeeded));
                }

                if self.created.swap(true, Ordering::SeqCst) {
                    debug!(ticket, "user already reported as created");
                } else {
                    info!("user created");
                    self.listener.user_created(true);
                }

                SubmitOutcome::Created
            }
            Verdict::Rejected(rejection) => {
                if !self.is_current(ticket) {
                    debug!(ticket, ?rejection, "stale signup response discarded");
                    return SubmitOutcome::Discarded;
                }

                info!(?rejection, "signup rejected");

                let phase = if rejection.is_network() {
                    SubmitPhase::NetworkError
                } else {
                    SubmitPhase::ServerError
                };

                let mut state = self.state();
                if matches!(rejection, Rejection::Policy { .. }) {
                    state.apply(Transition::SetCriteriaErrors(rejection.criteria_errors()));
                }
                if let Some(message) = rejection.api_error() {
                    state.apply(Transition::SetApiError(message.to_string()));
                }
                state.apply(Transition::SetPhase(phase));

                SubmitOutcome::Rejected(rejection)
            }
        }
    }
}

pub struct SignupForm {
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl SignupForm {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SignupConfig, listener: Arc<dyn SignupListener>) -> Result<Self> {
        let debouncer = Debouncer::new(config.debounce());
        let client = SignupClient::new(config)?;

        Ok(Self::with_client(client, listener, debouncer))
    }

    #[must_use]
    pub fn with_client(
        client: SignupClient,
        listener: Arc<dyn SignupListener>,
        debouncer: Debouncer,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(FormState::new()),
                client,
                listener,
                ticket: AtomicU64::new(0),
                created: AtomicBool::new(false),
                torn_down: AtomicBool::new(false),
            }),
            debouncer,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> FormState {
        self.shared.state().clone()
    }

    pub fn input_username(&self, value: impl Into<String>) {
        if self.shared.is_torn_down() {
            return;
        }
        self.shared
            .state()
            .apply(Transition::SetUsername(value.into()));
    }

    /// Record a password edit and restart the debounce timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn input_password(&self, value: impl Into<String>) {
        if self.shared.is_torn_down() {
            return;
        }

        {
            let mut state = self.shared.state();
            state.apply(Transition::SetPassword(value.into()));
            if !state.password_touched() {
                state.apply(Transition::SetPasswordTouched(true));
            }
        }

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        self.debouncer.schedule(async move {
            if let Some(shared) = shared.upgrade() {
                shared.revalidate();
            }
        });
    }

    /// Validate and, if everything passes locally, send one signup request.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.shared.is_torn_down() {
            return SubmitOutcome::Discarded;
        }

        if self.debouncer.cancel() {
            debug!("pending password validation superseded by submit");
        }

        let ticket = self.shared.ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let (username, password) = {
            let mut state = self.shared.state();
            state.apply(Transition::SetApiError(String::new()));
            state.apply(Transition::SetCriteriaErrors(Vec::new()));
            state.apply(Transition::SetSubmitAttempted(true));
            state.apply(Transition::SetPhase(SubmitPhase::Validating));

            let errors = criteria::validate(state.password());
            let rejected = state.username().is_empty() || !errors.is_empty();
            state.apply(Transition::SetCriteriaErrors(errors));

            if rejected {
                debug!(
                    username_empty = state.username().is_empty(),
                    violations = state.criteria_errors().len(),
                    "signup rejected locally"
                );
                state.apply(Transition::SetPhase(SubmitPhase::RejectedLocally));
                return SubmitOutcome::RejectedLocally;
            }

            state.apply(Transition::SetPhase(SubmitPhase::Submitting));
            (state.username().to_string(), state.password().to_string())
        };

        let span = info_span!("signup.submit", ticket, attempt = %Ulid::new());

        let verdict = match self
            .shared
            .client
            .create_user(&username, &password)
            .instrument(span)
            .await
        {
            Ok(reply) => classify(&reply),
            Err(e) => {
                error!("Error submitting signup: {e:#}");
                Verdict::Rejected(Rejection::Network)
            }
        };

        self.shared.settle(ticket, verdict)
    }

    /// Cancel the debounce timer and ignore everything that arrives later.
    pub fn teardown(&self) {
        if !self.shared.torn_down.swap(true, Ordering::SeqCst) {
            debug!("signup form torn down");
        }
        self.debouncer.cancel();
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.shared.is_torn_down()
    }
}

impl Drop for SignupForm {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("state", &*self.shared.state())
            .field("config", self.shared.client.config())
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}
