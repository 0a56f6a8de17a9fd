//! # Events emitted while a run executes.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (action name, 1-based index, attempt, backoff wait, failure reason).
//!
//! ## Ordering guarantees
//! Each event has a process-wide sequence number (`seq`) that increases
//! monotonically. Events of one run are published from one task in order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::BackoffScheduled)
//!     .with_action("fetch")
//!     .with_index(2, 3)
//!     .with_attempt(4)
//!     .with_delay(Duration::from_millis(150));
//!
//! assert_eq!(ev.action.as_deref(), Some("fetch"));
//! assert_eq!(ev.index, Some(2));
//! assert_eq!(ev.delay_ms, Some(150));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Worker started.
    ///
    /// Sets: `total`
    RunStarting,

    /// First attempt of an action is about to run.
    ///
    /// Sets: `action`, `index`, `total`
    ActionStarting,

    /// An attempt failed.
    ///
    /// Sets: `action`, `index`, `total`, `attempt`, `reason`
    ActionFailed,

    /// A retry of the same action is scheduled.
    ///
    /// Sets: `action`, `index`, `total`, `attempt` (the failed one), `delay_ms`
    BackoffScheduled,

    /// An attempt succeeded; the action is complete.
    ///
    /// Sets: `action`, `index`, `total`, `attempt`
    ActionSucceeded,

    /// A cancellation request won the race against a backoff wait.
    ///
    /// Sets: `action`, `index`, `total`
    CancelledDuringBackoff,

    /// A cancellation request was pending when an action succeeded.
    ///
    /// Sets: `action`, `index`, `total`
    CancelledAfterAction,

    /// A cancellation request reached the run after it stopped and was
    /// answered with "not running".
    CancelRejected,

    /// A cancel handle received a successful acknowledgment.
    CancelAcknowledged,

    /// Worker terminated.
    ///
    /// Sets: `outcome`, `total`
    RunFinished,
}

/// Terminal cause of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every action succeeded.
    Completed,
    /// A cancellation request was honored.
    Cancelled,
    /// The worker stopped abnormally (an action panicked or the runtime shut down).
    Aborted,
}

impl RunOutcome {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunOutcome::Completed => "completed",
            RunOutcome::Cancelled => "cancelled",
            RunOutcome::Aborted => "aborted",
        }
    }
}

/// Run event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Action name, if applicable.
    pub action: Option<Arc<str>>,
    /// 1-based position of the action in the run.
    pub index: Option<u32>,
    /// Number of actions in the run.
    pub total: Option<u32>,
    /// Attempt count for the action (starting from 1).
    pub attempt: Option<u32>,
    /// Backoff wait before the next attempt in milliseconds.
    pub delay_ms: Option<u32>,
    /// Human-readable failure reason.
    pub reason: Option<Arc<str>>,
    /// Terminal cause (only for `RunFinished`).
    pub outcome: Option<RunOutcome>,
}

impl Event {
    /// Creates an event with the current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            action: None,
            index: None,
            total: None,
            attempt: None,
            delay_ms: None,
            reason: None,
            outcome: None,
        }
    }

    #[inline]
    pub fn with_action(mut self, name: impl Into<Arc<str>>) -> Self {
        self.action = Some(name.into());
        self
    }

    /// Attaches the 1-based action index and the run's action count.
    #[inline]
    pub fn with_index(mut self, index: usize, total: usize) -> Self {
        self.index = Some(clamp_u32(index));
        self.total = Some(clamp_u32(total));
        self
    }

    #[inline]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(clamp_u32(total));
        self
    }

    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a backoff wait (stored as milliseconds, saturating).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(d.as_millis().min(u128::from(u32::MAX)) as u32);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[inline]
    pub fn with_outcome(mut self, outcome: RunOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

fn clamp_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
