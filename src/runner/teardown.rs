//! # Run teardown.
//!
//! [`Teardown`] owns the worker side of the rendezvous and performs the
//! termination sequence from its `Drop`, so it runs exactly once on every exit
//! path: completion, cancellation, a panicking action, or the runtime dropping
//! the worker future.
//!
//! ```text
//! drop(Teardown)
//!   ├─► report RunFinished
//!   ├─► notifier.send(())            (never blocks; ignored if nobody listens)
//!   ├─► answer pending tokens ─────► Err(NotRunning)
//!   ├─► done = true
//!   ├─► close channel, answer stragglers ─► Err(NotRunning)
//!   └─► drop receiver (anything left is answered by closure)
//! ```

use tokio::sync::{mpsc, oneshot, watch};

use crate::{error::RetryError, events::RunOutcome};

use super::{handle::Ack, report::Reporter};

pub(crate) struct Teardown {
    requests: mpsc::Receiver<Ack>,
    done: watch::Sender<bool>,
    notifier: Option<oneshot::Sender<()>>,
    reporter: Reporter,
    outcome: RunOutcome,
}

impl Teardown {
    pub(crate) fn new(
        requests: mpsc::Receiver<Ack>,
        done: watch::Sender<bool>,
        notifier: Option<oneshot::Sender<()>>,
        reporter: Reporter,
    ) -> Self {
        Self {
            requests,
            done,
            notifier,
            reporter,
            outcome: RunOutcome::Aborted,
        }
    }

    /// Worker side of the rendezvous channel.
    pub(crate) fn requests(&mut self) -> &mut mpsc::Receiver<Ack> {
        &mut self.requests
    }

    /// Records how the run ended; left as `Aborted` if never called.
    pub(crate) fn set_outcome(&mut self, outcome: RunOutcome) {
        self.outcome = outcome;
    }

    fn reject_pending(&mut self) {
        while let Ok(ack) = self.requests.try_recv() {
            self.reporter.cancel_rejected();
            let _ = ack.send(Err(RetryError::NotRunning));
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.reporter.run_finished(self.outcome);

        if let Some(notifier) = self.notifier.take() {
            let _ = notifier.send(());
        }

        self.reject_pending();
        self.done.send_replace(true);

        self.requests.close();
        self.reject_pending();
    }
}
