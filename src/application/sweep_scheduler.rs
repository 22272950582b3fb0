//! Periodic background expiration sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::handlers::membership::{SweepExpiredCommand, SweepExpiredHandler};

/// Runs the sweep handler every `period` until the returned task is aborted.
///
/// The first pass runs immediately. Passes never overlap: a slow pass delays
/// the next tick instead of queueing a burst.
pub fn spawn_sweep_scheduler(handler: Arc<SweepExpiredHandler>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = period.as_secs(), "Sweep scheduler started");

        loop {
            ticker.tick().await;
            debug!("Sweep tick");

            match handler.handle(SweepExpiredCommand).await {
                Ok(report) if report.is_clean() => {
                    info!(downgraded = report.downgraded_count, "Scheduled sweep completed");
                }
                Ok(report) => {
                    let failed: Vec<String> =
                        report.failures.iter().map(|id| id.to_string()).collect();
                    warn!(
                        downgraded = report.downgraded_count,
                        failed = ?failed,
                        "Scheduled sweep left profiles un-downgraded"
                    );
                }
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Scheduled sweep skipped; store unavailable, retrying next tick");
                }
                Err(e) => {
                    error!(error = %e, "Scheduled sweep failed");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::test_support::*;
    use crate::domain::membership::Role;

    #[tokio::test]
    async fn first_pass_runs_immediately() {
        let store = Arc::new(MockProfileStore::with_profiles(vec![profile(
            "lapsed",
            Role::Vip,
            Some(now().minus_days(1)),
        )]));
        let handler = Arc::new(SweepExpiredHandler::new(store.clone(), test_clock()));

        let task = spawn_sweep_scheduler(handler, Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_millis(100)).await;
        task.abort();

        assert_eq!(store.get("lapsed").unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn keeps_running_after_a_failed_pass() {
        let store = Arc::new(MockProfileStore::failing_reads());
        let handler = Arc::new(SweepExpiredHandler::new(store, test_clock()));

        let task = spawn_sweep_scheduler(handler, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!task.is_finished());
        task.abort();
    }
}
