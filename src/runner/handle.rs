//! # Cancellation handle.
//!
//! A [`CancelHandle`] talks to the run worker through a rendezvous channel:
//! each call sends a fresh reply token and waits for exactly one answer.
//!
//! ```text
//! cancel()
//!   ├─► done? ──────────────────────────────► Err(NotRunning)   (fast path)
//!   ├─► send(token) ─┐ or done flips first ─► Err(NotRunning)
//!   │                ▼
//!   │        worker checkpoint / teardown
//!   │                │ token.send(Ok | Err(NotRunning))
//!   └─► await reply ◄┘ or done flips first ─► Err(NotRunning)
//! ```
//!
//! ## Rules
//! - A reply that was already sent is always preferred over the done flag,
//!   so an acknowledged cancellation is never reported as "not running".
//!   The worker answers before it sets `done`, so the done branch reads the
//!   reply slot before giving up.
//! - Once the run is done, no call blocks.

use tokio::sync::{mpsc, oneshot, watch};

use crate::error::RetryError;

use super::report::Reporter;

/// Reply token carried through the rendezvous channel.
pub(crate) type Ack = oneshot::Sender<Result<(), RetryError>>;

/// Handle for cancelling a run started with [`start`](crate::start).
///
/// Cheap to clone; every clone talks to the same run. Only one call per run
/// ever returns `Ok(())`; all others return [`RetryError::NotRunning`].
///
/// There is no built-in timeout. Wrap [`cancel`](Self::cancel) in
/// `tokio::time::timeout` to bound the wait; a request abandoned that way may
/// still be consumed and stop the run.
#[derive(Clone)]
pub struct CancelHandle {
    requests: mpsc::Sender<Ack>,
    done: watch::Receiver<bool>,
    reporter: Reporter,
}

impl CancelHandle {
    pub(crate) fn new(
        requests: mpsc::Sender<Ack>,
        done: watch::Receiver<bool>,
        reporter: Reporter,
    ) -> Self {
        Self {
            requests,
            done,
            reporter,
        }
    }

    /// Requests cancellation and waits for the worker's answer.
    ///
    /// Resolves once the worker reaches a checkpoint (a backoff wait, or the
    /// moment an action succeeds). The action attempt in progress is never
    /// interrupted.
    ///
    /// # Errors
    /// [`RetryError::NotRunning`] if the run had already terminated.
    pub async fn cancel(&self) -> Result<(), RetryError> {
        if !self.is_running() {
            return Err(RetryError::NotRunning);
        }

        let mut done = self.done.clone();
        let (ack, mut reply) = oneshot::channel();

        tokio::select! {
            biased;
            sent = self.requests.send(ack) => {
                if sent.is_err() {
                    return Err(RetryError::NotRunning);
                }
            }
            _ = done.wait_for(|d| *d) => return Err(RetryError::NotRunning),
        }

        let res = tokio::select! {
            biased;
            answer = &mut reply => answer.unwrap_or(Err(RetryError::NotRunning)),
            _ = done.wait_for(|d| *d) => answer_after_done(&mut reply),
        };

        if res.is_ok() {
            self.reporter.cancel_acknowledged();
        }
        res
    }

    /// Blocking variant of [`cancel`](Self::cancel) for callers outside the
    /// async runtime.
    ///
    /// # Panics
    /// Must not be called from within an async execution context.
    pub fn cancel_blocking(&self) -> Result<(), RetryError> {
        futures::executor::block_on(self.cancel())
    }

    /// Returns `false` once the run has terminated.
    pub fn is_running(&self) -> bool {
        !*self.done.borrow()
    }
}

/// Answer for a request whose caller saw `done` flip while waiting.
///
/// The worker answers a token before it sets `done`, so a reply may already
/// be sitting in the slot even though the `done` branch won the poll.
fn answer_after_done(
    reply: &mut oneshot::Receiver<Result<(), RetryError>>,
) -> Result<(), RetryError> {
    reply.try_recv().unwrap_or(Err(RetryError::NotRunning))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time;

    use super::*;
    use crate::{config::RunConfig, runner::teardown::Teardown};

    fn wired() -> (CancelHandle, Teardown) {
        let reporter = Reporter::new(&RunConfig::default());
        let (requests_tx, requests_rx) = mpsc::channel::<Ack>(1);
        let (done_tx, done_rx) = watch::channel(false);
        (
            CancelHandle::new(requests_tx, done_rx, reporter.clone()),
            Teardown::new(requests_rx, done_tx, None, reporter),
        )
    }

    #[test]
    fn reply_sent_before_done_is_kept() {
        let (ack, mut reply) = oneshot::channel();
        ack.send(Ok(())).unwrap();
        assert_eq!(answer_after_done(&mut reply), Ok(()));
    }

    #[test]
    fn missing_reply_after_done_is_not_running() {
        let (ack, mut reply) = oneshot::channel::<Result<(), RetryError>>();
        assert_eq!(answer_after_done(&mut reply), Err(RetryError::NotRunning));

        drop(ack);
        assert_eq!(answer_after_done(&mut reply), Err(RetryError::NotRunning));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn ack_then_teardown_still_reports_ok() {
        let (handle, mut teardown) = wired();

        let call = handle.cancel();
        tokio::pin!(call);
        assert!(futures::poll!(call.as_mut()).is_pending());

        let ack = teardown.requests().try_recv().unwrap();
        ack.send(Ok(())).unwrap();
        drop(teardown);

        assert_eq!(call.await, Ok(()));
        assert!(!handle.is_running());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn request_queued_behind_the_acked_one_is_rejected() {
        let (handle, mut teardown) = wired();
        let other = handle.clone();

        let first = handle.cancel();
        let second = other.cancel();
        tokio::pin!(first, second);

        // first fills the slot, second waits for capacity.
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());

        let ack = teardown.requests().try_recv().unwrap();
        ack.send(Ok(())).unwrap();
        drop(teardown);

        assert_eq!(first.await, Ok(()));
        let late = time::timeout(Duration::from_secs(1), second)
            .await
            .expect("late request must not block");
        assert_eq!(late, Err(RetryError::NotRunning));
    }
}
