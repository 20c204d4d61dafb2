//! Fixed-interval tick driver.
//!
//! Ticks never overlap: each callback runs to completion before the next
//! interval is awaited. Missed intervals are skipped, not replayed. The loop
//! ends when the tick limit is reached or the shutdown future resolves,
//! whichever comes first.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub interval: Duration,
    pub max_ticks: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            interval: DEFAULT_TICK_INTERVAL,
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TickLimit,
    Shutdown,
}

/// Call `on_tick` once per interval (first call after one full interval).
/// Returns the number of ticks run and why the loop stopped.
pub async fn run<F, S>(config: SchedulerConfig, mut on_tick: F, shutdown: S) -> (u64, StopReason)
where
    F: FnMut(u64),
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let mut interval = tokio::time::interval_at(Instant::now() + config.interval, config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut ran = 0u64;
    loop {
        if config.max_ticks.is_some_and(|max| ran >= max) {
            return (ran, StopReason::TickLimit);
        }
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!(ticks = ran, "scheduler stopped");
                return (ran, StopReason::Shutdown);
            }
            _ = interval.tick() => {
                ran += 1;
                on_tick(ran);
            }
        }
    }
}

/// Run on a fresh current-thread runtime, stopping on Ctrl-C.
pub fn run_until_interrupted<F>(
    config: SchedulerConfig,
    on_tick: F,
) -> std::io::Result<(u64, StopReason)>
where
    F: FnMut(u64),
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(async {
        let interrupted = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "could not listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        run(config, on_tick, interrupted).await
    }))
}
