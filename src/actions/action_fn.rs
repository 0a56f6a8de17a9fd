//! # Function-backed action (`ActionFn`)
//!
//! [`ActionFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per
//! attempt. State that must survive between attempts lives in an `Arc` the
//! closure captures.
//!
//! ## Example
//! ```rust
//! use retryvisor::{ActionError, ActionFn, ActionRef};
//!
//! let a: ActionRef = ActionFn::arc("ping", || async {
//!     Ok::<_, ActionError>(())
//! });
//! assert_eq!(a.name(), "ping");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::actions::action::Action;
use crate::error::ActionError;

/// Closure-backed action.
#[derive(Debug)]
pub struct ActionFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ActionFn<F> {
    /// Creates a new closure-backed action.
    ///
    /// Prefer [`ActionFn::arc`] when you immediately need an [`ActionRef`](crate::ActionRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the action and returns it behind an `Arc`.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Action for ActionFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<(), ActionError> {
        (self.f)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn each_run_creates_a_fresh_future() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let action = ActionFn::new("count", move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        action.run().await.unwrap();
        action.run().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(action.name(), "count");
    }

    #[tokio::test]
    async fn failures_pass_through() {
        let action = ActionFn::new("broken", || async { Err::<(), _>(ActionError::fail("nope")) });
        let err = action.run().await.unwrap_err();
        assert_eq!(err.as_label(), "action_failed");
    }
}
