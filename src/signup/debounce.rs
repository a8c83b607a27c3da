//! Single-slot debounce timer.
//!
//! A [`Debouncer`] runs at most one pending task. Scheduling a new task aborts
//! the previous one if it has not fired yet, so for a burst of calls only the
//! last task ever runs. Tasks are spawned on the current tokio runtime, which
//! must exist when [`Debouncer::schedule`] is called.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Delay applied to password re-validation while the user is typing.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once the delay elapses, cancelling any task still waiting.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let deadline = Instant::now() + self.delay;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            task.await;
        });

        let previous = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);

        if let Some(previous) = previous {
            if !previous.is_finished() {
                trace!("debounce timer restarted");
            }
            previous.abort();
        }
    }

    /// Cancel the pending task. Returns true if one was still waiting.
    pub fn cancel(&self) -> bool {
        let pending = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match pending {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
