//! # Demo: retry_forever
//!
//! Retries a single operation with a strategy that gives up after 300ms. Each
//! time it gives up the schedule restarts, until the operation finally works.
//!
//! ## Run
//! ```bash
//! cargo run --example retry_forever
//! ```

use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use retryvisor::{BackoffPolicy, JitterPolicy, retry_until_success};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let mut strategy = BackoffPolicy {
        first: Duration::from_millis(20),
        max: Duration::from_millis(200),
        factor: 2.0,
        jitter: JitterPolicy::None,
        max_elapsed: Some(Duration::from_millis(300)),
    }
    .strategy();

    let calls = &AtomicU32::new(0);
    let port = retry_until_success(
        "bind-port",
        move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 8 {
                Err(format!("address in use (attempt {n})"))
            } else {
                Ok(8080u16)
            }
        },
        &mut strategy,
    )
    .await;

    println!("bound to port {port} after {} attempts", calls.load(Ordering::SeqCst));
    Ok(())
}
