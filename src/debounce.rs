//! Debounced callbacks backed by Tokio timers

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs a callback once input has been quiet for `wait`.
///
/// Every [`Debounced::call`] cancels the pending timer and schedules a new
/// one with the latest arguments, so only the last call inside a quiet
/// window reaches the callback. The timer belongs to this value: it is
/// aborted by [`Debounced::cancel`] and when the value is dropped.
///
/// Calls must be made from within a Tokio runtime.
pub struct Debounced<A> {
    callback: Arc<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<A: Send + 'static> Debounced<A> {
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            wait,
            pending: None,
        }
    }

    /// Reschedule the callback with `args`, dropping any earlier arguments
    pub fn call(&mut self, args: A) {
        self.cancel();

        let callback = Arc::clone(&self.callback);
        let wait = self.wait;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback(args);
        }));
    }
}

impl<A> Debounced<A> {
    /// Abort the pending call, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<A> Drop for Debounced<A> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<A> std::fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.wait)
            .field("pending", &self.is_pending())
            .finish()
    }
}
