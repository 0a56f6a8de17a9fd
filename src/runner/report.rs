//! # Run reporting: tracing records plus optional bus events.
//!
//! Every lifecycle point of a run goes through [`Reporter`], which logs it
//! according to [`Verbosity`] and publishes the matching [`Event`] when a bus
//! is attached. Event publishing ignores verbosity.

use std::{sync::Arc, time::Duration};

use crate::{
    config::{RunConfig, Verbosity},
    error::ActionError,
    events::{Bus, Event, EventKind, RunOutcome},
};

#[derive(Clone)]
pub(crate) struct Reporter {
    names: Arc<str>,
    total: usize,
    verbosity: Verbosity,
    bus: Option<Bus>,
}

impl Reporter {
    pub(crate) fn new(cfg: &RunConfig) -> Self {
        Self {
            names: cfg.action_names().into(),
            total: cfg.actions.len(),
            verbosity: cfg.verbosity,
            bus: cfg.bus.clone(),
        }
    }

    fn publish(&self, ev: impl FnOnce() -> Event) {
        if let Some(bus) = &self.bus {
            bus.publish(ev());
        }
    }

    pub(crate) fn run_starting(&self) {
        if self.verbosity.debug {
            tracing::debug!(actions = %self.names, total = self.total, "starting run");
        }
        self.publish(|| Event::new(EventKind::RunStarting).with_total(self.total));
    }

    pub(crate) fn action_starting(&self, index: usize, name: &str) {
        if self.verbosity.debug {
            tracing::debug!(action = name, index, total = self.total, "starting action");
        }
        self.publish(|| {
            Event::new(EventKind::ActionStarting)
                .with_action(name)
                .with_index(index, self.total)
        });
    }

    pub(crate) fn action_failed(
        &self,
        index: usize,
        name: &str,
        attempt: u32,
        err: &ActionError,
        wait: Duration,
    ) {
        if self.verbosity.reports_failures() {
            tracing::error!(
                action = name,
                index,
                total = self.total,
                attempt,
                error = %err,
                next_wait = ?wait,
                "action failed"
            );
        }
        self.publish(|| {
            Event::new(EventKind::ActionFailed)
                .with_action(name)
                .with_index(index, self.total)
                .with_attempt(attempt)
                .with_reason(err.to_string())
        });
        self.publish(|| {
            Event::new(EventKind::BackoffScheduled)
                .with_action(name)
                .with_index(index, self.total)
                .with_attempt(attempt)
                .with_delay(wait)
        });
    }

    pub(crate) fn action_succeeded(&self, index: usize, name: &str, attempt: u32) {
        if self.verbosity.debug {
            tracing::debug!(action = name, index, total = self.total, attempt, "action succeeded");
        }
        self.publish(|| {
            Event::new(EventKind::ActionSucceeded)
                .with_action(name)
                .with_index(index, self.total)
                .with_attempt(attempt)
        });
    }

    pub(crate) fn cancelled_during_backoff(&self, index: usize, name: &str) {
        if self.verbosity.reports_failures() {
            tracing::info!(action = name, index, total = self.total, "cancelled during backoff");
        }
        self.publish(|| {
            Event::new(EventKind::CancelledDuringBackoff)
                .with_action(name)
                .with_index(index, self.total)
        });
    }

    pub(crate) fn cancelled_after_action(&self, index: usize, name: &str) {
        if self.verbosity.reports_failures() {
            tracing::info!(action = name, index, total = self.total, "cancelled after action");
        }
        self.publish(|| {
            Event::new(EventKind::CancelledAfterAction)
                .with_action(name)
                .with_index(index, self.total)
        });
    }

    pub(crate) fn cancel_rejected(&self) {
        if self.verbosity.debug {
            tracing::debug!(actions = %self.names, "cancellation arrived after run ended");
        }
        self.publish(|| Event::new(EventKind::CancelRejected));
    }

    pub(crate) fn cancel_acknowledged(&self) {
        if self.verbosity.reports_failures() {
            tracing::info!(actions = %self.names, "cancellation finished OK");
        }
        self.publish(|| Event::new(EventKind::CancelAcknowledged));
    }

    pub(crate) fn run_finished(&self, outcome: RunOutcome) {
        if self.verbosity.debug {
            tracing::debug!(outcome = outcome.as_label(), total = self.total, "run finished");
        }
        if outcome == RunOutcome::Aborted && self.verbosity.reports_failures() {
            tracing::warn!(actions = %self.names, "run aborted before reaching a checkpoint");
        }
        self.publish(|| {
            Event::new(EventKind::RunFinished)
                .with_outcome(outcome)
                .with_total(self.total)
        });
    }
}
