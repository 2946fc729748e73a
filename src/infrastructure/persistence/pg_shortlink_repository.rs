//! PostgreSQL implementation of the shortlink repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewShortlink, Shortlink};
use crate::domain::repositories::ShortlinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for shortlink storage and lookup.
///
/// Each call checks a connection out of the pool for the duration of one
/// statement; the connection goes back to the pool when the guard drops.
pub struct PgShortlinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortlinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortlinkRow {
    id: Uuid,
    long_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortlinkRow> for Shortlink {
    fn from(row: ShortlinkRow) -> Self {
        Shortlink::new(row.id, row.long_url, row.created_at)
    }
}

#[async_trait]
impl ShortlinkRepository for PgShortlinkRepository {
    async fn create(&self, new_shortlink: NewShortlink) -> Result<Shortlink, AppError> {
        let row = sqlx::query_as::<_, ShortlinkRow>(
            r#"
            INSERT INTO shortlink (id, long_url)
            VALUES ($1, $2)
            RETURNING id, long_url, created_at
            "#,
        )
        .bind(new_shortlink.id)
        .bind(new_shortlink.long_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shortlink>, AppError> {
        let row = sqlx::query_as::<_, ShortlinkRow>(
            r#"
            SELECT id, long_url, created_at
            FROM shortlink
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Shortlink::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shortlink")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
