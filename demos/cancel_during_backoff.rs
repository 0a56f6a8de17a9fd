//! # Demo: cancel_during_backoff
//!
//! Starts a run whose only action never succeeds, lets it retry for a while,
//! then cancels it. The first cancel is acknowledged; the second reports that
//! the run is no longer running.
//!
//! ## Run
//! ```bash
//! cargo run --example cancel_during_backoff
//! ```

use std::time::Duration;

use retryvisor::{ActionError, ActionFn, BackoffPolicy, JitterPolicy, RunConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .init();

    let policy = BackoffPolicy {
        first: Duration::from_millis(50),
        max: Duration::from_millis(400),
        factor: 2.0,
        jitter: JitterPolicy::Equal,
        max_elapsed: None,
    };

    let cfg = RunConfig::default()
        .with_action(ActionFn::arc("reach-upstream", || async {
            Err::<(), _>(ActionError::fail("upstream unavailable"))
        }))
        .with_backoff_policy(policy);

    let handle = retryvisor::start(cfg);
    tokio::time::sleep(Duration::from_secs(1)).await;

    println!("first cancel: {:?}", handle.cancel().await);
    println!("second cancel: {:?}", handle.cancel().await);
    println!("running: {}", handle.is_running());
    Ok(())
}
