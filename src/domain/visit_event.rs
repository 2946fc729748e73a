//! Visit event model for asynchronous statistics merging.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An in-memory record of one resolved redirect, waiting to be merged
/// into the shortlink's stats.
///
/// Used to pass visits from the redirect handler to the background worker
/// via a channel, so the redirect is returned without waiting on storage.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler once the slug resolved
/// 2. Submitted with [`crate::domain::visit_worker::submit_visit`] (non-blocking)
/// 3. Merged by [`crate::domain::visit_worker::run_visit_worker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitEvent {
    pub shortlink_id: Uuid,
    pub visited_at: DateTime<Utc>,
}

impl VisitEvent {
    /// Creates a visit event for the given shortlink and time.
    pub fn new(shortlink_id: Uuid, visited_at: DateTime<Utc>) -> Self {
        Self {
            shortlink_id,
            visited_at,
        }
    }

    /// Creates a visit event stamped with the current time.
    pub fn now(shortlink_id: Uuid) -> Self {
        Self::new(shortlink_id, Utc::now())
    }
}
