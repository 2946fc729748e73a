//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{ShortlinkService, StatsService};
use crate::domain::repositories::{ShortlinkRepository, StatsRepository};
use crate::domain::visit_event::VisitEvent;

/// Services and the visit queue, shared by all requests.
///
/// Repositories are held as trait objects so the same router runs on
/// PostgreSQL in production and on the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub shortlink_service: Arc<ShortlinkService<dyn ShortlinkRepository>>,
    pub stats_service: Arc<StatsService<dyn StatsRepository>>,
    pub visit_sender: mpsc::Sender<VisitEvent>,
}

impl AppState {
    pub fn new(
        shortlink_repository: Arc<dyn ShortlinkRepository>,
        stats_repository: Arc<dyn StatsRepository>,
        service_root: impl Into<String>,
        visit_sender: mpsc::Sender<VisitEvent>,
    ) -> Self {
        Self {
            shortlink_service: Arc::new(ShortlinkService::new(shortlink_repository, service_root)),
            stats_service: Arc::new(StatsService::new(stats_repository)),
            visit_sender,
        }
    }
}
