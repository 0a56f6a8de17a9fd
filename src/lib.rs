//! # retryvisor
//!
//! **Retryvisor** runs an ordered list of named actions one at a time,
//! retrying each failing action with exponential backoff until it succeeds,
//! and lets callers cancel the run at well-defined checkpoints.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Action 1   │──►│   Action 2   │──►│   Action N   │   (sequential)
//!     └──────────────┘   └──────────────┘   └──────────────┘
//!            ▲
//! ┌──────────┴────────────────────────────────────────────────────────┐
//! │  Worker (one spawned task per run)                                │
//! │  - retries the current action with a per-action BackoffStrategy   │
//! │  - services cancellation during backoff and after each success    │
//! │  - Teardown: notifier, "not running" replies, done flag           │
//! └──────┬─────────────────────────────────────▲──────────────────────┘
//!        │ Events (optional Bus)               │ reply token (mpsc)
//!        ▼                                     │ answer (oneshot)
//!   broadcast receivers                ┌───────┴───────┐
//!                                      │ CancelHandle  │  (clone freely)
//!                                      └───────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! RunConfig ──► start() ──► CancelHandle
//!                  └──► spawn worker
//!
//! for each action {
//!   loop {
//!     ├─► run attempt
//!     │     ├─ Ok  ──► break
//!     │     └─ Err ──► wait = strategy.next_wait()
//!     │                race { cancel ─► ack Ok, exit ; wait elapsed ─► retry }
//!   }
//!   ├─► cancel pending? ─► ack Ok, exit
//!   └─► drop strategy
//! }
//! teardown (exactly once): notify, reject late requests, done = true
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / functions                        |
//! |-------------------|-------------------------------------------------------------|----------------------------------------------|
//! | **Runs**          | Start a cancellable sequential run.                         | [`start`], [`CancelHandle`], [`RunConfig`]   |
//! | **Actions**       | Define actions as closures or trait objects.                | [`Action`], [`ActionFn`], [`ActionRef`]      |
//! | **Backoff**       | Pluggable wait schedules with jitter.                       | [`BackoffStrategy`], [`BackoffPolicy`]       |
//! | **Retry helper**  | Retry one operation forever, no cancellation.               | [`retry_until_success`]                      |
//! | **Events**        | Observe run lifecycle on a broadcast bus.                   | [`Bus`], [`Event`], [`EventKind`]            |
//! | **Errors**        | Typed errors for actions and cancellation.                  | [`ActionError`], [`RetryError`]              |
//!
//! ## Logging
//! Run activity is recorded with [`tracing`], gated by [`Verbosity`]. The crate
//! never installs a subscriber.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{ActionError, ActionFn, RetryError, RunConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let cfg = RunConfig::default()
//!         .with_action(ActionFn::arc("unreachable-db", || async {
//!             Err::<(), _>(ActionError::fail("connection refused"))
//!         }));
//!
//!     let cancel = retryvisor::start(cfg);
//!     tokio::time::sleep(Duration::from_millis(30)).await;
//!
//!     assert_eq!(cancel.cancel().await, Ok(()));
//!     assert_eq!(cancel.cancel().await, Err(RetryError::NotRunning));
//! }
//! ```
mod actions;
mod config;
mod error;
mod events;
mod policies;
mod retry;
mod runner;

// ---- Public re-exports ----

pub use actions::{Action, ActionFn, ActionRef};
pub use config::{RunConfig, Verbosity};
pub use error::{ActionError, RetryError};
pub use events::{Bus, Event, EventKind, RunOutcome};
pub use policies::{
    BackoffPolicy, BackoffStrategy, BackoffSupplier, ExponentialBackoff, JitterPolicy,
};
pub use retry::retry_until_success;
pub use runner::{CancelHandle, start};
