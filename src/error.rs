//! Error types used by retryvisor.
//!
//! - [`RetryError`] is the only error visible at the cancellation boundary.
//! - [`ActionError`] is what an action reports when an attempt fails; the
//!   runner absorbs it and turns it into a backoff wait.
//!
//! Both provide `as_label` for logs/metrics.

use std::error::Error as StdError;
use thiserror::Error;

/// # Errors returned by a [`CancelHandle`](crate::CancelHandle).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryError {
    /// The run had already terminated when the cancellation was serviced.
    #[error("not running")]
    NotRunning,
}

impl RetryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::RetryError;
    ///
    /// assert_eq!(RetryError::NotRunning.as_label(), "run_not_running");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::NotRunning => "run_not_running",
        }
    }
}

/// # Failure of a single action attempt.
///
/// Never fatal to a run: every failure is retried after a backoff wait.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActionError {
    /// Attempt failed with a message.
    #[error("action failed: {reason}")]
    Fail {
        /// Human-readable failure description.
        reason: String,
    },

    /// Attempt failed with an underlying error.
    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl ActionError {
    /// Shorthand for [`ActionError::Fail`].
    pub fn fail(reason: impl Into<String>) -> Self {
        ActionError::Fail {
            reason: reason.into(),
        }
    }

    /// Wraps any error type.
    ///
    /// # Example
    /// ```
    /// use retryvisor::ActionError;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    /// let err = ActionError::other(io);
    /// assert_eq!(err.to_string(), "refused");
    /// assert_eq!(err.as_label(), "action_error");
    /// ```
    pub fn other(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        ActionError::Other(err.into())
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::Fail { .. } => "action_failed",
            ActionError::Other(_) => "action_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_message_includes_reason() {
        let err = ActionError::fail("connection refused");
        assert_eq!(err.to_string(), "action failed: connection refused");
        assert_eq!(err.as_label(), "action_failed");
    }

    #[test]
    fn not_running_display() {
        assert_eq!(RetryError::NotRunning.to_string(), "not running");
    }
}
