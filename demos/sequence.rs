//! # Demo: sequence
//!
//! Runs three actions in order. The middle one fails twice before it
//! succeeds, so the log shows two backoff waits before the run moves on.
//!
//! ## Run
//! ```bash
//! cargo run --example sequence
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use retryvisor::{ActionError, ActionFn, Bus, EventKind, RunConfig, Verbosity};
use tokio::sync::oneshot;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .init();

    let bus = Bus::new(64);
    let mut events = bus.subscribe();
    let (done_tx, done_rx) = oneshot::channel();

    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();

    let cfg = RunConfig::default()
        .with_action(ActionFn::arc("resolve-endpoint", || async {
            Ok::<_, ActionError>(())
        }))
        .with_action(ActionFn::arc("open-connection", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n <= 2 {
                    Err(ActionError::fail(format!("connection refused (attempt {n})")))
                } else {
                    Ok(())
                }
            }
        }))
        .with_action(ActionFn::arc("handshake", || async {
            Ok::<_, ActionError>(())
        }))
        .with_verbosity(Verbosity::debug())
        .with_notifier(done_tx)
        .with_bus(bus);

    let handle = retryvisor::start(cfg);
    done_rx.await?;

    while let Ok(ev) = events.try_recv() {
        if ev.kind == EventKind::BackoffScheduled {
            println!(
                "[backoff] action={:?} after_attempt={:?} delay_ms={:?}",
                ev.action, ev.attempt, ev.delay_ms
            );
        }
    }

    println!("late cancel: {:?}", handle.cancel().await);
    Ok(())
}
