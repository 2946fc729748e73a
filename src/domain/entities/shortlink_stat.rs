//! Visit statistics for shortlinks.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use uuid::Uuid;

use super::Shortlink;

/// The merged visit record of one shortlink.
///
/// Exists only once the shortlink has been visited at least once.
/// `visits` only grows and `last_visit` is the latest timestamp ever
/// submitted, regardless of the order submissions were applied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlinkStat {
    pub shortlink_id: Uuid,
    pub visits: i64,
    pub last_visit: DateTime<Utc>,
}

impl ShortlinkStat {
    /// The record produced by a first visit.
    pub fn first_visit(shortlink_id: Uuid, visited_at: DateTime<Utc>) -> Self {
        Self {
            shortlink_id,
            visits: 1,
            last_visit: visited_at,
        }
    }

    /// Folds one more visit into the record.
    pub fn merge_visit(&mut self, visited_at: DateTime<Utc>) {
        self.visits += 1;
        self.last_visit = self.last_visit.max(visited_at);
    }
}

/// A shortlink together with its stats.
///
/// A shortlink that was never visited has `visits == 0` and no `last_visit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlinkWithStats {
    pub shortlink: Shortlink,
    pub visits: i64,
    pub last_visit: Option<DateTime<Utc>>,
}

impl ShortlinkWithStats {
    /// Pairs a shortlink with its stats record, or the zero state if there is none.
    pub fn new(shortlink: Shortlink, stat: Option<ShortlinkStat>) -> Self {
        match stat {
            Some(stat) => Self {
                shortlink,
                visits: stat.visits,
                last_visit: Some(stat.last_visit),
            },
            None => Self {
                shortlink,
                visits: 0,
                last_visit: None,
            },
        }
    }
}

/// Metric used to rank shortlinks in top-N queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatMetric {
    #[default]
    Visits,
    LastVisit,
}

impl StatMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatMetric::Visits => "visits",
            StatMetric::LastVisit => "last_visit",
        }
    }
}

impl fmt::Display for StatMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
