//! # Backoff strategies for retrying failed actions.
//!
//! A run never computes waits itself; it asks a [`BackoffStrategy`] for the
//! next wait after every failure and drops the strategy once the action
//! succeeds. Strategies are produced on demand by a [`BackoffSupplier`], so
//! each action starts its schedule from the beginning.
//!
//! [`BackoffPolicy`] is the plain configuration value; it builds an
//! [`ExponentialBackoff`] whose wait for retry `n` is `first × factor^n`,
//! clamped to `max`, then jittered.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{BackoffPolicy, BackoffStrategy, JitterPolicy};
//!
//! let policy = BackoffPolicy {
//!     first: Duration::from_millis(100),
//!     max: Duration::from_secs(1),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//!     max_elapsed: None,
//! };
//!
//! let mut strategy = policy.strategy();
//! assert_eq!(strategy.next_wait(), Some(Duration::from_millis(100)));
//! assert_eq!(strategy.next_wait(), Some(Duration::from_millis(200)));
//! assert_eq!(strategy.next_wait(), Some(Duration::from_millis(400)));
//!
//! strategy.reset();
//! assert_eq!(strategy.next_wait(), Some(Duration::from_millis(100)));
//! ```

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;

use crate::policies::jitter::JitterPolicy;

/// Stateful source of successive retry waits.
pub trait BackoffStrategy: Send + 'static {
    /// Returns the wait before the next retry.
    ///
    /// `None` means the strategy's own time budget is spent. The cancellable
    /// runner answers that by calling [`reset`](Self::reset) and asking again.
    fn next_wait(&mut self) -> Option<Duration>;

    /// Restarts the schedule from its first wait.
    fn reset(&mut self);
}

impl<S: BackoffStrategy + ?Sized> BackoffStrategy for Box<S> {
    fn next_wait(&mut self) -> Option<Duration> {
        (**self).next_wait()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Factory producing a fresh strategy for every action that fails.
pub type BackoffSupplier = Arc<dyn Fn() -> Box<dyn BackoffStrategy> + Send + Sync>;

/// Exponential backoff configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackoffPolicy {
    /// Wait before the first retry.
    pub first: Duration,
    /// Upper bound for any single wait.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` keeps waits non-decreasing).
    pub factor: f64,
    /// Randomization applied to each wait.
    pub jitter: JitterPolicy,
    /// Time budget since the last reset after which the strategy gives up
    /// (`None` = never).
    pub max_elapsed: Option<Duration>,
}

impl Default for BackoffPolicy {
    /// `first = 10ms`, `factor = 1.5`, `max = 1s`, no jitter, no elapsed-time
    /// budget (retries are unbounded).
    fn default() -> Self {
        Self {
            first: Duration::from_millis(10),
            max: Duration::from_secs(1),
            factor: 1.5,
            jitter: JitterPolicy::None,
            max_elapsed: None,
        }
    }
}

impl BackoffPolicy {
    /// Un-jittered wait for the given retry (0-indexed), clamped to `max`.
    pub fn delay(&self, retry: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let exp = retry.min(i32::MAX as u32) as i32;
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);

        if !secs.is_finite() || secs < 0.0 || secs > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        }
    }

    /// Builds a strategy following this policy, starting at retry 0.
    pub fn strategy(&self) -> ExponentialBackoff {
        ExponentialBackoff::new(*self)
    }

    /// Wraps the policy as a supplier for [`RunConfig`](crate::RunConfig).
    pub fn supplier(self) -> BackoffSupplier {
        Arc::new(move || Box::new(self.strategy()) as Box<dyn BackoffStrategy>)
    }
}

/// [`BackoffStrategy`] driven by a [`BackoffPolicy`].
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    policy: BackoffPolicy,
    retry: u32,
    prev: Option<Duration>,
    started: Instant,
}

impl ExponentialBackoff {
    /// Creates a strategy at the start of `policy`'s schedule.
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            policy,
            retry: 0,
            prev: None,
            started: Instant::now(),
        }
    }

    /// Number of waits handed out since the last reset.
    pub fn retries(&self) -> u32 {
        self.retry
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn next_wait(&mut self) -> Option<Duration> {
        if let Some(budget) = self.policy.max_elapsed {
            if self.started.elapsed() > budget {
                return None;
            }
        }

        let base = self.policy.delay(self.retry);
        self.retry = self.retry.saturating_add(1);

        let floor = self.policy.first.min(self.policy.max);
        let wait = self
            .policy
            .jitter
            .apply(base, self.prev, floor, self.policy.max);
        self.prev = Some(wait);
        Some(wait)
    }

    fn reset(&mut self) {
        self.retry = 0;
        self.prev = None;
        self.started = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(first_ms: u64, max_ms: u64, factor: f64) -> BackoffPolicy {
        BackoffPolicy {
            first: Duration::from_millis(first_ms),
            max: Duration::from_millis(max_ms),
            factor,
            jitter: JitterPolicy::None,
            max_elapsed: None,
        }
    }

    fn assert_close(actual: Option<Duration>, expected_us: u64) {
        let actual = actual.map(|d| d.as_micros() as i128).unwrap_or(-1);
        assert!(
            (actual - expected_us as i128).abs() <= 1,
            "expected ~{expected_us}us, got {actual}us"
        );
    }

    #[test]
    fn default_matches_documented_schedule() {
        let mut s = BackoffPolicy::default().strategy();
        assert_close(s.next_wait(), 10_000);
        assert_close(s.next_wait(), 15_000);
        assert_close(s.next_wait(), 22_500);
    }

    #[test]
    fn default_is_capped_at_one_second() {
        let mut s = BackoffPolicy::default().strategy();
        let last = (0..40).filter_map(|_| s.next_wait()).last();
        assert_eq!(last, Some(Duration::from_secs(1)));
    }

    #[test]
    fn waits_are_non_decreasing_without_jitter() {
        let mut s = policy(100, 5_000, 2.0).strategy();
        let waits: Vec<_> = (0..12).filter_map(|_| s.next_wait()).collect();
        assert_eq!(waits.len(), 12);
        assert!(waits.windows(2).all(|w| w[0] <= w[1]), "{waits:?}");
        assert_eq!(waits.last(), Some(&Duration::from_secs(5)));
    }

    #[test]
    fn first_exceeding_max_is_clamped() {
        let p = policy(10_000, 5_000, 2.0);
        assert_eq!(p.delay(0), Duration::from_secs(5));
    }

    #[test]
    fn overflowing_exponent_clamps_to_max() {
        let p = policy(100, 10_000, 2.0);
        assert_eq!(p.delay(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn reset_restarts_schedule() {
        let mut s = policy(100, 5_000, 3.0).strategy();
        s.next_wait();
        s.next_wait();
        assert_eq!(s.retries(), 2);

        s.reset();
        assert_eq!(s.retries(), 0);
        assert_eq!(s.next_wait(), Some(Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_elapsed_budget() {
        let mut p = policy(100, 1_000, 1.0);
        p.max_elapsed = Some(Duration::from_secs(2));
        let mut s = p.strategy();

        assert!(s.next_wait().is_some());
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(s.next_wait(), None);

        s.reset();
        assert_eq!(s.next_wait(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn supplier_hands_out_fresh_strategies() {
        let supplier = policy(100, 5_000, 2.0).supplier();
        let mut a = supplier();
        a.next_wait();
        a.next_wait();

        let mut b = supplier();
        assert_eq!(b.next_wait(), Some(Duration::from_millis(100)));
    }
}
