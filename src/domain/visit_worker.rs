//! Background merging of visit events into shortlink stats.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::application::services::StatsService;
use crate::domain::repositories::StatsRepository;
use crate::domain::visit_event::VisitEvent;

/// Hands a visit to the background worker without waiting for it to be stored.
///
/// The fast path is a non-blocking `try_send`. When the queue is full the
/// send is moved to a detached task that waits for capacity, so a burst
/// delays the merge instead of losing it. A closed queue is logged.
pub fn submit_visit(sender: &mpsc::Sender<VisitEvent>, event: VisitEvent) {
    match sender.try_send(event) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(event)) => {
            warn!(
                shortlink_id = %event.shortlink_id,
                "Visit queue full, deferring visit"
            );
            metrics::counter!("shortlink_visits_deferred_total").increment(1);

            let sender = sender.clone();
            tokio::spawn(async move {
                if let Err(mpsc::error::SendError(event)) = sender.send(event).await {
                    error!(
                        shortlink_id = %event.shortlink_id,
                        "Visit queue closed, visit not recorded"
                    );
                    metrics::counter!("shortlink_visits_failed_total").increment(1);
                }
            });
        }
        Err(mpsc::error::TrySendError::Closed(event)) => {
            error!(
                shortlink_id = %event.shortlink_id,
                "Visit queue closed, visit not recorded"
            );
            metrics::counter!("shortlink_visits_failed_total").increment(1);
        }
    }
}

/// Drains the visit queue, merging each event into storage.
///
/// At most `concurrency` merges run at once. Every merge goes through
/// [`StatsService::record_visit`]; failures, including a panicking merge
/// task, are logged and counted, never dropped silently.
///
/// Returns once every sender is dropped and all in-flight merges finished.
pub async fn run_visit_worker<R>(
    mut rx: mpsc::Receiver<VisitEvent>,
    stats_service: Arc<StatsService<R>>,
    concurrency: usize,
) where
    R: StatsRepository + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let service = stats_service.clone();
        in_flight.spawn(async move {
            let _permit = permit;
            merge_visit(&service, event).await;
        });

        while let Some(joined) = in_flight.try_join_next() {
            report_panicked_merge(joined);
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        report_panicked_merge(joined);
    }
    info!("Visit worker stopped");
}

fn report_panicked_merge(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Visit merge task failed");
        metrics::counter!("shortlink_visits_failed_total").increment(1);
    }
}

async fn merge_visit<R>(service: &StatsService<R>, event: VisitEvent)
where
    R: StatsRepository + ?Sized,
{
    match service
        .record_visit(event.shortlink_id, event.visited_at)
        .await
    {
        Ok(()) => {
            debug!(shortlink_id = %event.shortlink_id, "Visit recorded");
            metrics::counter!("shortlink_visits_recorded_total").increment(1);
        }
        Err(e) => {
            error!(
                shortlink_id = %event.shortlink_id,
                visited_at = %event.visited_at,
                error = %e,
                "Failed to record visit"
            );
            metrics::counter!("shortlink_visits_failed_total").increment(1);
        }
    }
}
