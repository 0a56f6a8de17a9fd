//! # Jitter policy for backoff waits.
//!
//! [`JitterPolicy`] randomizes the wait produced by a backoff strategy so that
//! many runs failing against the same dependency do not retry in lockstep.
//!
//! - [`JitterPolicy::None`]: exact wait, fully predictable
//! - [`JitterPolicy::Full`]: random wait in `[0, wait]`
//! - [`JitterPolicy::Equal`]: `wait/2 + random[0, wait/2]`
//! - [`JitterPolicy::Decorrelated`]: random wait in `[floor, prev * 3]`, capped

use rand::Rng;
use std::time::Duration;

/// Randomization applied to every wait handed out by
/// [`ExponentialBackoff`](crate::ExponentialBackoff).
///
/// Only [`JitterPolicy::None`] keeps waits non-decreasing across retries of
/// the same action; the other variants trade that ordering for load spreading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Exact wait.
    #[default]
    None,

    /// Random wait in `[0, wait]`.
    Full,

    /// `wait/2 + random[0, wait/2]`; keeps about 75% of the wait on average.
    Equal,

    /// Random wait in `[floor, prev * 3]`, capped at `max`.
    ///
    /// Falls back to the un-jittered wait as `prev` on the first retry.
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to `wait`.
    ///
    /// `prev` is the wait handed out on the previous retry (if any); `floor` and
    /// `max` bound the decorrelated variant and are ignored by the others.
    pub fn apply(
        &self,
        wait: Duration,
        prev: Option<Duration>,
        floor: Duration,
        max: Duration,
    ) -> Duration {
        match self {
            JitterPolicy::None => wait,
            JitterPolicy::Full => full(wait),
            JitterPolicy::Equal => equal(wait),
            JitterPolicy::Decorrelated => decorrelated(floor, prev.unwrap_or(wait), max),
        }
    }
}

fn full(wait: Duration) -> Duration {
    scaled(wait)
}

fn equal(wait: Duration) -> Duration {
    let half = wait / 2;
    (half + scaled(half)).min(wait)
}

fn decorrelated(floor: Duration, prev: Duration, max: Duration) -> Duration {
    let upper = prev.saturating_mul(3).min(max).max(floor);
    if floor >= upper {
        return floor;
    }
    floor + scaled(upper - floor)
}

/// Random fraction of `span`, never above it.
fn scaled(span: Duration) -> Duration {
    if span.is_zero() {
        return Duration::ZERO;
    }
    span.mul_f64(rand::rng().random_range(0.0..=1.0)).min(span)
}
