//! # Unconditional retry.
//!
//! [`retry_until_success`] retries a single operation forever against a
//! caller-supplied [`BackoffStrategy`]. Unlike a cancellable run it has no
//! cancellation path and no sequencing.
//!
//! ```text
//! reset strategy
//! loop {
//!   ├─► operation()
//!   │     ├─ Ok(v) ──► return v
//!   │     └─ Err   ──► next_wait()
//!   │                   ├─ Some(wait) ─► log, sleep(wait)
//!   │                   └─ None       ─► log, reset (schedule restarts)
//! }
//! ```

use std::{fmt::Display, future::Future};

use tokio::time;

use crate::policies::BackoffStrategy;

/// Retries `operation` until it succeeds and returns its value.
///
/// Every failure is logged with the next wait. When `strategy` gives up
/// (`next_wait` returns `None`), the failure is logged, the strategy is reset
/// and retrying resumes immediately from the start of its schedule.
///
/// # Example
/// ```rust
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use retryvisor::{retry_until_success, BackoffPolicy};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let calls = &AtomicU32::new(0);
///     let mut strategy = BackoffPolicy::default().strategy();
///
///     let warmup = move || async move {
///         let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
///         if n < 3 { Err(format!("not yet ({n})")) } else { Ok(n) }
///     };
///     let n = retry_until_success("warmup", warmup, &mut strategy).await;
///
///     assert_eq!(n, 3);
/// }
/// ```
pub async fn retry_until_success<F, Fut, T, E, S>(
    name: &str,
    mut operation: F,
    strategy: &mut S,
) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    S: BackoffStrategy + ?Sized,
{
    strategy.reset();
    loop {
        let err = match operation().await {
            Ok(value) => return value,
            Err(err) => err,
        };

        match strategy.next_wait() {
            Some(wait) => {
                tracing::error!(
                    operation = name,
                    error = %err,
                    next_wait = ?wait,
                    "operation failed"
                );
                time::sleep(wait).await;
            }
            None => {
                tracing::error!(
                    operation = name,
                    error = %err,
                    "operation failed; will keep trying"
                );
                strategy.reset();
            }
        }
    }
}
