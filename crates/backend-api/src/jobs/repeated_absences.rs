//! Scheduled repeated-absence check.
//!
//! The schedule runs; the aggregation itself (absences per class and student
//! over a window, teacher alert past a threshold) is not implemented, so each
//! run only records that it happened.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use attendance_config::AggregatorConfig;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct RepeatedAbsenceAggregator {
    runs: AtomicU64,
}

impl RepeatedAbsenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run_once(&self) {
        let run = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        info!(run, "repeated-absence check triggered; aggregation not implemented");
    }

    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }
}

/// Start the periodic trigger, first firing one full interval after startup.
///
/// Returns `None` when the job is disabled or the interval cannot be
/// represented as a point in time.
pub fn spawn(
    config: &AggregatorConfig,
    aggregator: Arc<RepeatedAbsenceAggregator>,
) -> Option<JoinHandle<()>> {
    if !config.enabled {
        return None;
    }

    let period = Duration::from_secs(config.interval_seconds.max(1));
    let Some(start) = Instant::now().checked_add(period) else {
        warn!(
            interval_seconds = period.as_secs(),
            "repeated-absence interval out of range, schedule not started"
        );
        return None;
    };
    info!(interval_seconds = period.as_secs(), "repeated-absence schedule started");

    Some(tokio::spawn(async move {
        let mut ticker = interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            aggregator.run_once().await;
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_schedule_does_not_start() {
        let aggregator = Arc::new(RepeatedAbsenceAggregator::new());
        let handle = spawn(&AggregatorConfig::default(), aggregator.clone());

        assert!(handle.is_none());
        assert_eq!(aggregator.runs(), 0);
    }

    #[tokio::test]
    async fn run_once_counts_runs() {
        let aggregator = RepeatedAbsenceAggregator::new();
        aggregator.run_once().await;
        aggregator.run_once().await;

        assert_eq!(aggregator.runs(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn enabled_schedule_fires_after_each_interval() {
        let aggregator = Arc::new(RepeatedAbsenceAggregator::new());
        let config = AggregatorConfig {
            enabled: true,
            interval_seconds: 60,
        };

        let handle = spawn(&config, aggregator.clone()).expect("schedule should start");
        assert_eq!(aggregator.runs(), 0);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(aggregator.runs(), 0);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(aggregator.runs(), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        handle.abort();
        assert_eq!(aggregator.runs(), 2);
    }

    #[tokio::test]
    async fn unrepresentable_interval_does_not_start() {
        let aggregator = Arc::new(RepeatedAbsenceAggregator::new());
        let config = AggregatorConfig {
            enabled: true,
            interval_seconds: u64::MAX,
        };

        assert!(spawn(&config, aggregator.clone()).is_none());
        assert_eq!(aggregator.runs(), 0);
    }
}
