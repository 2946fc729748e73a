//! PostgreSQL implementation of the statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Shortlink, ShortlinkStat, ShortlinkWithStats, StatMetric};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Create-or-merge of one visit, evaluated server-side in a single statement.
const RECORD_VISIT_SQL: &str = r#"
    INSERT INTO shortlink_stat AS sls (shortlink_id, visits, last_visit)
    VALUES ($1, 1, $2)
    ON CONFLICT (shortlink_id) DO UPDATE
    SET visits = sls.visits + 1,
        last_visit = GREATEST(sls.last_visit, EXCLUDED.last_visit)
"#;

const TOP_BY_VISITS_SQL: &str = r#"
    SELECT s.id, s.long_url, s.created_at, st.visits, st.last_visit
    FROM shortlink s
    LEFT JOIN shortlink_stat st ON st.shortlink_id = s.id
    ORDER BY COALESCE(st.visits, 0) DESC, s.created_at DESC, s.id
    LIMIT $1
"#;

const TOP_BY_LAST_VISIT_SQL: &str = r#"
    SELECT s.id, s.long_url, s.created_at, st.visits, st.last_visit
    FROM shortlink s
    LEFT JOIN shortlink_stat st ON st.shortlink_id = s.id
    ORDER BY st.last_visit DESC NULLS LAST, s.created_at DESC, s.id
    LIMIT $1
"#;

/// PostgreSQL repository for visit statistics.
///
/// Visits are merged with `INSERT ... ON CONFLICT DO UPDATE`, so concurrent
/// writers, including writers in other processes sharing the database,
/// never lose an increment.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StatRow {
    shortlink_id: Uuid,
    visits: i64,
    last_visit: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RankedRow {
    id: Uuid,
    long_url: String,
    created_at: DateTime<Utc>,
    visits: Option<i64>,
    last_visit: Option<DateTime<Utc>>,
}

impl From<RankedRow> for ShortlinkWithStats {
    fn from(row: RankedRow) -> Self {
        ShortlinkWithStats {
            shortlink: Shortlink::new(row.id, row.long_url, row.created_at),
            visits: row.visits.unwrap_or(0),
            last_visit: row.last_visit,
        }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_visit(
        &self,
        shortlink_id: Uuid,
        visited_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(RECORD_VISIT_SQL)
            .bind(shortlink_id)
            .bind(visited_at)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_by_shortlink_id(
        &self,
        shortlink_id: Uuid,
    ) -> Result<Option<ShortlinkStat>, AppError> {
        let row = sqlx::query_as::<_, StatRow>(
            r#"
            SELECT shortlink_id, visits, last_visit
            FROM shortlink_stat
            WHERE shortlink_id = $1
            "#,
        )
        .bind(shortlink_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| ShortlinkStat {
            shortlink_id: r.shortlink_id,
            visits: r.visits,
            last_visit: r.last_visit,
        }))
    }

    async fn top(
        &self,
        metric: StatMetric,
        limit: i64,
    ) -> Result<Vec<ShortlinkWithStats>, AppError> {
        let sql = match metric {
            StatMetric::Visits => TOP_BY_VISITS_SQL,
            StatMetric::LastVisit => TOP_BY_LAST_VISIT_SQL,
        };

        let rows = sqlx::query_as::<_, RankedRow>(sql)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(ShortlinkWithStats::from).collect())
    }
}
