#![allow(dead_code)]

use chrono::{DateTime, Utc};
use shortlink_service::domain::visit_event::VisitEvent;
use shortlink_service::infrastructure::memory::MemoryStore;
use shortlink_service::infrastructure::persistence::{PgShortlinkRepository, PgStatsRepository};
use shortlink_service::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

pub const SERVICE_ROOT: &str = "http://localhost:3000";

/// State backed by the in-memory store; the receiver stands in for the visit worker.
pub fn memory_state() -> (AppState, mpsc::Receiver<VisitEvent>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(store.clone(), store.clone(), SERVICE_ROOT, tx);

    (state, rx, store)
}

pub fn pg_state(pool: PgPool) -> (AppState, mpsc::Receiver<VisitEvent>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Arc::new(PgShortlinkRepository::new(pool.clone())),
        Arc::new(PgStatsRepository::new(pool)),
        SERVICE_ROOT,
        tx,
    );

    (state, rx)
}

pub async fn create_test_shortlink(pool: &PgPool, url: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO shortlink (id, long_url) VALUES ($1, $2) RETURNING id")
        .bind(Uuid::new_v4())
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_shortlink_at(pool: &PgPool, url: &str, created_at: DateTime<Utc>) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO shortlink (id, long_url, created_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(url)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_stat(pool: &PgPool, id: Uuid, visits: i64, last_visit: DateTime<Utc>) {
    sqlx::query("INSERT INTO shortlink_stat (shortlink_id, visits, last_visit) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(visits)
        .bind(last_visit)
        .execute(pool)
        .await
        .unwrap();
}
