//! Repository trait for visit statistics.

use crate::domain::entities::{ShortlinkStat, ShortlinkWithStats, StatMetric};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository interface for merging and querying visit statistics.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_stats.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Merges one visit into the stats of a shortlink.
    ///
    /// Creates the record with `visits = 1, last_visit = visited_at` if none
    /// exists, otherwise increments `visits` and keeps the greater of the
    /// stored and submitted timestamps. The whole create-or-update is a
    /// single atomic operation: concurrent calls for the same shortlink
    /// never lose an increment and `last_visit` never moves backwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shortlink does not exist.
    /// Returns [`AppError::Conflict`] on a transient storage conflict (retryable).
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on storage errors.
    async fn record_visit(
        &self,
        shortlink_id: Uuid,
        visited_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Loads the stats record of a shortlink, if it was ever visited.
    async fn find_by_shortlink_id(
        &self,
        shortlink_id: Uuid,
    ) -> Result<Option<ShortlinkStat>, AppError>;

    /// Returns up to `limit` shortlinks ranked descending by `metric`.
    ///
    /// Shortlinks without stats take part in the ranking with zero visits
    /// and no last visit (ranked after every visited shortlink for
    /// [`StatMetric::LastVisit`]). Ties are broken by newest creation time.
    async fn top(
        &self,
        metric: StatMetric,
        limit: i64,
    ) -> Result<Vec<ShortlinkWithStats>, AppError>;
}
