//! # Run configuration.
//!
//! [`RunConfig`] bundles everything one run needs. It is consumed by
//! [`start`](crate::start) and never mutated afterwards.
//!
//! ## Defaults
//! - `backoff = None` → [`BackoffPolicy::default()`] (10ms × 1.5, capped at 1s, unbounded)
//! - `notifier = None` → nobody is told when the run ends
//! - `verbosity = Verbosity::default()` → failures and cancellations are logged
//! - `bus = None` → no events are published

use tokio::sync::oneshot;

use crate::{
    actions::ActionRef,
    events::Bus,
    policies::{BackoffPolicy, BackoffSupplier},
};

/// Controls which run activity is logged.
///
/// Logging only; verbosity never changes how a run behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verbosity {
    /// Log every action start and teardown detail at debug level.
    pub debug: bool,
    /// Suppress failure and cancellation logs (overridden by `debug`).
    pub quiet: bool,
}

impl Verbosity {
    /// Debug logging enabled.
    pub fn debug() -> Self {
        Self {
            debug: true,
            quiet: false,
        }
    }

    /// Failure and cancellation logs suppressed.
    pub fn quiet() -> Self {
        Self {
            debug: false,
            quiet: true,
        }
    }

    /// Whether per-attempt failures and cancellations are reported.
    #[inline]
    pub fn reports_failures(&self) -> bool {
        self.debug || !self.quiet
    }
}

/// Configuration for one run.
///
/// ## Example
/// ```rust
/// use retryvisor::{ActionError, ActionFn, BackoffPolicy, RunConfig, Verbosity};
///
/// let cfg = RunConfig::default()
///     .with_action(ActionFn::arc("connect", || async { Ok::<_, ActionError>(()) }))
///     .with_action(ActionFn::arc("migrate", || async { Ok::<_, ActionError>(()) }))
///     .with_backoff_policy(BackoffPolicy::default())
///     .with_verbosity(Verbosity::quiet());
///
/// assert_eq!(cfg.action_names(), "connect, migrate");
/// ```
#[derive(Default)]
pub struct RunConfig {
    /// Actions to execute, in order.
    pub actions: Vec<ActionRef>,

    /// Signalled once when the run terminates for any reason.
    ///
    /// The send never blocks; a dropped receiver is ignored.
    pub notifier: Option<oneshot::Sender<()>>,

    /// Factory for the per-action backoff strategy.
    ///
    /// `None` is replaced by [`BackoffPolicy::default()`] when the run starts.
    pub backoff: Option<BackoffSupplier>,

    /// Logging verbosity.
    pub verbosity: Verbosity,

    /// Optional bus receiving lifecycle events.
    pub bus: Option<Bus>,
}

impl RunConfig {
    /// Creates a config for the given actions with all other settings defaulted.
    pub fn new(actions: Vec<ActionRef>) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }

    /// Appends an action.
    pub fn with_action(mut self, action: ActionRef) -> Self {
        self.actions.push(action);
        self
    }

    /// Sets the completion notifier.
    pub fn with_notifier(mut self, notifier: oneshot::Sender<()>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Sets a custom backoff supplier.
    pub fn with_backoff(mut self, supplier: BackoffSupplier) -> Self {
        self.backoff = Some(supplier);
        self
    }

    /// Uses strategies built from `policy`.
    pub fn with_backoff_policy(self, policy: BackoffPolicy) -> Self {
        self.with_backoff(policy.supplier())
    }

    /// Sets logging verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Attaches an event bus.
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Action names joined with `", "`.
    pub fn action_names(&self) -> String {
        self.actions
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_gates() {
        assert!(Verbosity::default().reports_failures());
        assert!(!Verbosity::quiet().reports_failures());
        assert!(Verbosity::debug().reports_failures());

        let both = Verbosity {
            debug: true,
            quiet: true,
        };
        assert!(both.reports_failures());
    }

    #[test]
    fn empty_config_has_no_names() {
        let cfg = RunConfig::default();
        assert!(cfg.actions.is_empty());
        assert_eq!(cfg.action_names(), "");
        assert!(cfg.backoff.is_none());
    }
}
