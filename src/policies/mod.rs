//! Backoff policies.
//!
//! This module groups the knobs that decide **how long** a run waits before
//! retrying a failed action.
//!
//! ## Contents
//! - [`BackoffStrategy`] stateful source of waits (`next_wait` / `reset`)
//! - [`BackoffPolicy`]   exponential configuration (first / factor / max / budget + jitter)
//! - [`JitterPolicy`]    randomization applied to each wait
//!
//! ## Quick wiring
//! ```text
//! RunConfig { backoff: Option<BackoffSupplier> }
//!      └─► runner creates one strategy per failing action:
//!           - next_wait() before each retry
//!           - dropped when the action succeeds
//! ```
//!
//! ## Defaults
//! - `BackoffPolicy::default()` → first=10ms, factor=1.5, max=1s, jitter=None, no budget.

mod backoff;
mod jitter;

pub use backoff::{BackoffPolicy, BackoffStrategy, BackoffSupplier, ExponentialBackoff};
pub use jitter::JitterPolicy;
