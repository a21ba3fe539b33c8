//! Demo driver for the sluice scheduler.
//!
//! Builds a paused scheduler with a concurrency cap and a retry budget,
//! submits a batch of timed tasks (one of which always fails, one of which
//! recovers after a retry), resumes after a delay, and prints the results.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::time::{Duration, sleep};
use tracing_subscriber::EnvFilter;

use sluice_core::{Action, Scheduler, SchedulerConfig, TraceObserver};

/// A timed task that fails its first `failures` runs, then succeeds.
struct FlakyFetch {
    label: &'static str,
    delay_ms: u64,
    remaining_failures: AtomicU32,
}

impl FlakyFetch {
    fn new(label: &'static str, delay_ms: u64, failures: u32) -> Self {
        Self {
            label,
            delay_ms,
            remaining_failures: AtomicU32::new(failures),
        }
    }
}

#[async_trait]
impl Action<String> for FlakyFetch {
    async fn run(&self) -> Result<String, String> {
        sleep(Duration::from_millis(self.delay_ms)).await;

        let left = self.remaining_failures.load(Ordering::Relaxed);
        if left > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(format!("{}: intentional failure (left={left})", self.label));
        }
        Ok(format!("{} is finished", self.label))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let scheduler = Scheduler::with_observer(
        SchedulerConfig {
            concurrency: 4,
            start_paused: true,
            max_retries: 2,
        },
        Arc::new(TraceObserver),
    );

    // Resume from the outside after two seconds, like an operator would.
    let resumer = scheduler.clone();
    tokio::spawn(async move {
        sleep(Duration::from_secs(2)).await;
        resumer.resume().await;
    });

    let batch = match scheduler
        .submit([
            FlakyFetch::new("task 1", 300, 0),
            FlakyFetch::new("task 2", 600, 0),
            FlakyFetch::new("task 3", 500, 0),
            // Fails on every attempt: terminal failure after the retries.
            FlakyFetch::new("task 4", 800, u32::MAX),
            FlakyFetch::new("task 5", 1000, 0),
            // Fails once, succeeds on the retry.
            FlakyFetch::new("task 6", 400, 1),
            FlakyFetch::new("task 7", 500, 0),
        ])
        .await
    {
        Ok(batch) => batch,
        Err(err) => {
            tracing::error!(%err, "submission rejected");
            return;
        }
    };

    for result in batch.wait().await {
        match result {
            Ok(value) => println!("ok:   {value}"),
            Err(failure) => println!("fail: {failure}"),
        }
    }

    let stats = scheduler.stats().await;
    println!(
        "submitted={} succeeded={} retries={} failed={} peak_executing={}",
        stats.total_submitted,
        stats.total_succeeded,
        stats.total_retries,
        stats.total_failed,
        stats.peak_executing
    );
}
