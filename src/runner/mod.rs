//! Runner: the cancellable action sequence.
//!
//! The only public API from this module is [`start`] and the
//! [`CancelHandle`] it returns.
//!
//! Internal modules:
//! - [`run`]: spawns the worker and drives actions, retries and checkpoints;
//! - [`handle`]: caller side of the cancellation rendezvous;
//! - [`teardown`]: termination sequence, run exactly once per worker;
//! - [`report`]: verbosity-gated logging and bus events.
//!
//! ## Wiring
//! ```text
//!  CancelHandle ──(mpsc: reply token)──► worker ──(oneshot: Ok / NotRunning)──► CancelHandle
//!       ▲                                  │
//!       └──────────(watch: done)────── Teardown
//! ```

mod handle;
mod report;
mod run;
mod teardown;

pub use handle::CancelHandle;
pub use run::start;
