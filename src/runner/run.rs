//! # Run worker: sequential actions with backoff and cancellation checkpoints.
//!
//! [`start`] spawns one worker per run and returns its [`CancelHandle`].
//!
//! ## Worker loop
//! ```text
//! for each action (1-indexed):
//!   loop {
//!     ├─► attempt += 1
//!     ├─► action.run()
//!     │     ├─ Ok  ──► break
//!     │     └─ Err ──► strategy = strategy or supplier()
//!     │               ├─ wait = strategy.next_wait()   (None → reset, ask again)
//!     │               └─ race:
//!     │                    ├─ cancel token ─► ack Ok, exit (Cancelled)
//!     │                    └─ wait elapsed ─► retry same action
//!   }
//!   ├─► poll cancel token (non-blocking) ─► ack Ok, exit (Cancelled)
//!   └─► drop strategy (next action starts a fresh schedule)
//! exit (Completed)
//! ```
//!
//! ## Rules
//! - Actions run **sequentially**; an action is retried in place until it
//!   succeeds or the run is cancelled. There is no retry limit.
//! - Cancellation is serviced only at checkpoints, never mid-attempt.
//! - Teardown (see [`Teardown`]) runs exactly once on every exit path.

use std::time::Duration;

use tokio::{
    sync::{mpsc, watch},
    time,
};

use crate::{
    actions::ActionRef,
    config::RunConfig,
    events::RunOutcome,
    policies::{BackoffPolicy, BackoffStrategy, BackoffSupplier},
};

use super::{
    handle::{Ack, CancelHandle},
    report::Reporter,
    teardown::Teardown,
};

/// Starts a run in the background and returns its cancellation handle.
///
/// Returns immediately. An empty action list finishes at once; cancelling it
/// yields [`RetryError::NotRunning`](crate::RetryError::NotRunning).
///
/// # Panics
/// Must be called from within a tokio runtime.
///
/// # Example
/// ```rust
/// use retryvisor::{ActionError, ActionFn, RunConfig, RetryError};
/// use tokio::sync::oneshot;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let (done_tx, done_rx) = oneshot::channel();
///     let cfg = RunConfig::default()
///         .with_action(ActionFn::arc("hello", || async { Ok::<_, ActionError>(()) }))
///         .with_notifier(done_tx);
///
///     let handle = retryvisor::start(cfg);
///     done_rx.await.unwrap();
///     assert_eq!(handle.cancel().await, Err(RetryError::NotRunning));
/// }
/// ```
pub fn start(config: RunConfig) -> CancelHandle {
    let reporter = Reporter::new(&config);
    let (requests_tx, requests_rx) = mpsc::channel::<Ack>(1);
    let (done_tx, done_rx) = watch::channel(false);

    let RunConfig {
        actions,
        notifier,
        backoff,
        ..
    } = config;
    let supplier = backoff.unwrap_or_else(|| BackoffPolicy::default().supplier());

    let teardown = Teardown::new(requests_rx, done_tx, notifier, reporter.clone());
    tokio::spawn(worker(actions, supplier, teardown, reporter.clone()));

    CancelHandle::new(requests_tx, done_rx, reporter)
}

async fn worker(
    actions: Vec<ActionRef>,
    supplier: BackoffSupplier,
    mut teardown: Teardown,
    reporter: Reporter,
) {
    let outcome = run_actions(&actions, &supplier, teardown.requests(), &reporter).await;
    teardown.set_outcome(outcome);
}

async fn run_actions(
    actions: &[ActionRef],
    supplier: &BackoffSupplier,
    requests: &mut mpsc::Receiver<Ack>,
    reporter: &Reporter,
) -> RunOutcome {
    reporter.run_starting();
    let mut strategy: Option<Box<dyn BackoffStrategy>> = None;

    for (i, action) in actions.iter().enumerate() {
        let index = i + 1;
        let name = action.name();
        reporter.action_starting(index, name);

        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            let err = match action.run().await {
                Ok(()) => break,
                Err(err) => err,
            };

            let wait = next_wait(strategy.get_or_insert_with(|| supplier()).as_mut());
            reporter.action_failed(index, name, attempt, &err, wait);

            tokio::select! {
                Some(ack) = requests.recv() => {
                    reporter.cancelled_during_backoff(index, name);
                    let _ = ack.send(Ok(()));
                    return RunOutcome::Cancelled;
                }
                _ = time::sleep(wait) => {}
            }
        }
        reporter.action_succeeded(index, name, attempt);

        if let Ok(ack) = requests.try_recv() {
            reporter.cancelled_after_action(index, name);
            let _ = ack.send(Ok(()));
            return RunOutcome::Cancelled;
        }
        strategy = None;
    }

    RunOutcome::Completed
}

/// Next wait from `strategy`; a strategy that gave up is reset and asked once more.
fn next_wait(strategy: &mut dyn BackoffStrategy) -> Duration {
    if let Some(wait) = strategy.next_wait() {
        return wait;
    }
    strategy.reset();
    strategy.next_wait().unwrap_or_default()
}
