//! DTOs for visit statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::StatMetric;

/// Query parameters of `GET /stats`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TopStatsParams {
    /// Ranking metric, `visits` when omitted.
    pub metric: Option<StatMetric>,

    /// Number of entries, 10 when omitted.
    #[validate(range(min = 0, max = 100))]
    pub limit: Option<i64>,
}

/// The merged visit statistics of one shortlink.
///
/// `last_visit` is `null` for a shortlink that was never visited.
#[derive(Debug, Serialize)]
pub struct ShortlinkStatsResponse {
    pub slug: String,
    pub short_url: String,
    pub long_url: String,
    pub visits: i64,
    pub last_visit: Option<DateTime<Utc>>,
}
