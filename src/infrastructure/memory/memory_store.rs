//! In-process implementation of both repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{
    NewShortlink, Shortlink, ShortlinkStat, ShortlinkWithStats, StatMetric,
};
use crate::domain::repositories::{ShortlinkRepository, StatsRepository};
use crate::error::AppError;

/// Shortlinks and their stats held in concurrent hash maps.
///
/// The entry lock of a stats key serialises every merge for that
/// shortlink, which gives the same create-or-merge atomicity as the
/// PostgreSQL upsert within one process. State is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    shortlinks: DashMap<Uuid, Shortlink>,
    stats: DashMap<Uuid, ShortlinkStat>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortlinkRepository for MemoryStore {
    async fn create(&self, new_shortlink: NewShortlink) -> Result<Shortlink, AppError> {
        match self.shortlinks.entry(new_shortlink.id) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "id": new_shortlink.id }),
            )),
            Entry::Vacant(slot) => {
                let shortlink = Shortlink::new(new_shortlink.id, new_shortlink.long_url, Utc::now());
                slot.insert(shortlink.clone());
                Ok(shortlink)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shortlink>, AppError> {
        Ok(self.shortlinks.get(&id).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.shortlinks.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn record_visit(
        &self,
        shortlink_id: Uuid,
        visited_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !self.shortlinks.contains_key(&shortlink_id) {
            return Err(AppError::not_found(
                "Referenced shortlink does not exist",
                json!({ "shortlink_id": shortlink_id }),
            ));
        }

        self.stats
            .entry(shortlink_id)
            .and_modify(|stat| stat.merge_visit(visited_at))
            .or_insert_with(|| ShortlinkStat::first_visit(shortlink_id, visited_at));

        Ok(())
    }

    async fn find_by_shortlink_id(
        &self,
        shortlink_id: Uuid,
    ) -> Result<Option<ShortlinkStat>, AppError> {
        Ok(self.stats.get(&shortlink_id).map(|entry| entry.value().clone()))
    }

    async fn top(
        &self,
        metric: StatMetric,
        limit: i64,
    ) -> Result<Vec<ShortlinkWithStats>, AppError> {
        let mut ranked: Vec<ShortlinkWithStats> = self
            .shortlinks
            .iter()
            .map(|entry| {
                let stat = self.stats.get(entry.key()).map(|s| s.value().clone());
                ShortlinkWithStats::new(entry.value().clone(), stat)
            })
            .collect();

        ranked.sort_by(|a, b| {
            let by_metric = match metric {
                StatMetric::Visits => b.visits.cmp(&a.visits),
                // `None` sorts before `Some`, so reversing puts never-visited last
                StatMetric::LastVisit => b.last_visit.cmp(&a.last_visit),
            };

            by_metric
                .then_with(|| b.shortlink.created_at.cmp(&a.shortlink.created_at))
                .then_with(|| a.shortlink.id.cmp(&b.shortlink.id))
        });
        ranked.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(ranked)
    }
}
