//! Asynchronous click processing worker.
//!
//! Drains the bounded click channel and persists each event: one append to
//! the clicks table, then one counter increment. Every failure is logged and
//! counted but never retried synchronously and never surfaced — losing an
//! occasional click under store pressure is acceptable, slowing a redirect is
//! not.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickRepository;

/// Runs until the sending side of the channel is dropped.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
) {
    while let Some(ev) = rx.recv().await {
        process_click(clicks.as_ref(), ev).await;
    }

    info!("click worker stopped: channel closed");
}

/// Persists a single click event: record append, then counter increment.
///
/// The increment is skipped when the append fails, so counters never run
/// ahead of the click log.
pub(crate) async fn process_click(clicks: &dyn ClickRepository, ev: ClickEvent) {
    let link_id = ev.link_id;
    let destination_id = ev.destination_id;

    if let Err(e) = clicks.insert(ev.into()).await {
        warn!(link_id, destination_id, error = %e, "failed to record click");
        counter!("clicks_failed_total").increment(1);
        return;
    }

    if let Err(e) = clicks.increment_counters(link_id, destination_id).await {
        warn!(link_id, destination_id, error = %e, "failed to increment click counters");
        counter!("click_counter_failures_total").increment(1);
        return;
    }

    debug!(link_id, destination_id, "click recorded");
    counter!("clicks_recorded_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockClickRepository;
    use crate::error::AppError;
    use serde_json::json;

    fn event(link_id: i64, destination_id: i64) -> ClickEvent {
        ClickEvent::new(
            link_id,
            destination_id,
            "https://example.com".to_string(),
            Some("127.0.0.1".to_string()),
            Some("TestBot/1.0"),
            None,
        )
    }

    #[tokio::test]
    async fn test_worker_persists_events_then_stops_on_close() {
        let mut mock = MockClickRepository::new();
        mock.expect_insert().times(2).returning(|_| Ok(()));
        mock.expect_increment_counters()
            .times(2)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(event(1, 10)).await.unwrap();
        tx.send(event(1, 11)).await.unwrap();
        drop(tx);

        // Returns only after draining the queue and observing the close.
        run_click_worker(rx, Arc::new(mock)).await;
    }

    #[tokio::test]
    async fn test_insert_failure_skips_counter_increment() {
        let mut mock = MockClickRepository::new();
        mock.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("store down", json!({}))));
        mock.expect_increment_counters().times(0);

        process_click(&mock, event(1, 10)).await;
    }

    #[tokio::test]
    async fn test_counter_failure_is_swallowed() {
        let mut mock = MockClickRepository::new();
        mock.expect_insert().times(1).returning(|_| Ok(()));
        mock.expect_increment_counters()
            .times(1)
            .returning(|_, _| Err(AppError::internal("store down", json!({}))));

        // Must not panic or propagate.
        process_click(&mock, event(2, 20)).await;
    }
}
