//! Click record retention.
//!
//! Click rows are historical/analytical only, so they expire after a fixed
//! window. PostgreSQL has no TTL index, so a background worker deletes
//! expired rows on an interval.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::domain::repositories::ClickRepository;

/// Periodically purges clicks older than `retention_days`.
///
/// Runs forever; intended to be spawned once at startup. Purge failures are
/// logged and retried on the next tick.
pub async fn run_retention_worker(
    clicks: Arc<dyn ClickRepository>,
    retention_days: u32,
    interval_secs: u64,
) {
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        purge_expired(clicks.as_ref(), retention_days).await;
    }
}

/// Executes one purge pass.
pub(crate) async fn purge_expired(clicks: &dyn ClickRepository, retention_days: u32) {
    let cutoff = Utc::now() - chrono::Duration::days(i64::from(retention_days));

    match clicks.purge_older_than(cutoff).await {
        Ok(0) => {}
        Ok(purged) => {
            info!(purged, retention_days, "expired click records purged");
            counter!("clicks_purged_total").increment(purged);
        }
        Err(e) => {
            warn!(error = %e, "click retention purge failed");
        }
    }
}
