//! Visit statistics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Shortlink, ShortlinkWithStats, StatMetric};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;
use crate::utils::retry::retry_once_on_conflict;

/// Largest `limit` accepted by [`StatsService::get_top`].
pub const MAX_TOP_LIMIT: i64 = 100;

/// Default `limit` for top-N queries.
pub const DEFAULT_TOP_LIMIT: i64 = 10;

/// Service for merging visits and reading visit statistics.
pub struct StatsService<R: StatsRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: StatsRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Merges one visit into a shortlink's stats, retrying once on conflict.
    ///
    /// Called by the background visit worker for every queued
    /// [`crate::domain::visit_event::VisitEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shortlink does not exist.
    /// Returns [`AppError::Conflict`] if the merge conflicted twice.
    pub async fn record_visit(
        &self,
        shortlink_id: uuid::Uuid,
        visited_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let repository = &self.repository;
        retry_once_on_conflict(move || repository.record_visit(shortlink_id, visited_at)).await
    }

    /// Returns the merged stats of a shortlink.
    ///
    /// A shortlink that was never visited yields `visits == 0` and no
    /// `last_visit`; this is not an error.
    pub async fn get_one(&self, shortlink: Shortlink) -> Result<ShortlinkWithStats, AppError> {
        let stat = self.repository.find_by_shortlink_id(shortlink.id).await?;
        Ok(ShortlinkWithStats::new(shortlink, stat))
    }

    /// Returns up to `limit` shortlinks ranked descending by `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is outside `0..=100`.
    pub async fn get_top(
        &self,
        metric: StatMetric,
        limit: i64,
    ) -> Result<Vec<ShortlinkWithStats>, AppError> {
        if !(0..=MAX_TOP_LIMIT).contains(&limit) {
            return Err(AppError::validation(
                format!("limit must be between 0 and {MAX_TOP_LIMIT}"),
                json!([{ "loc": ["query", "limit"], "input": limit }]),
            ));
        }

        if limit == 0 {
            return Ok(Vec::new());
        }

        self.repository.top(metric, limit).await
    }
}
