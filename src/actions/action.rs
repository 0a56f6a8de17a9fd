//! # Action abstraction.
//!
//! An [`Action`] has a stable [`name`](Action::name) used in logs and events,
//! and an async [`run`](Action::run) invoked once per attempt. The runner may
//! call `run` many times on the same value, so implementations must not
//! assume a single invocation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ActionError;

/// # Shared handle to an action object.
pub type ActionRef = Arc<dyn Action>;

/// # Named, retryable unit of work.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use retryvisor::{Action, ActionError};
///
/// struct Migrate;
///
/// #[async_trait]
/// impl Action for Migrate {
///     fn name(&self) -> &str { "migrate" }
///
///     async fn run(&self) -> Result<(), ActionError> {
///         // apply schema...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Action: Send + Sync + 'static {
    /// Returns a stable, human-readable action name.
    fn name(&self) -> &str;

    /// Performs one attempt.
    ///
    /// An `Err` is never fatal: the runner waits out a backoff delay and calls
    /// `run` again. The attempt itself is not preempted by cancellation.
    async fn run(&self) -> Result<(), ActionError>;
}
