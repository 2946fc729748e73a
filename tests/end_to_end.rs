mod common;

use axum_test::TestServer;
use serde_json::{Value, json};
use shortlink_service::application::services::StatsService;
use shortlink_service::domain::slug;
use shortlink_service::domain::visit_event::VisitEvent;
use shortlink_service::domain::visit_worker::run_visit_worker;
use shortlink_service::infrastructure::persistence::{PgShortlinkRepository, PgStatsRepository};
use shortlink_service::routes::router;
use shortlink_service::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Full router on PostgreSQL with a running visit worker.
fn spawn_app(pool: PgPool) -> (TestServer, tokio::task::JoinHandle<()>) {
    let pool = Arc::new(pool);
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Arc::new(PgShortlinkRepository::new(pool.clone())),
        Arc::new(PgStatsRepository::new(pool)),
        common::SERVICE_ROOT,
        tx,
    );

    let worker = tokio::spawn(run_visit_worker(rx, state.stats_service.clone(), 4));

    (TestServer::new(router(state)).unwrap(), worker)
}

async fn wait_for_visits(server: &TestServer, slug: &str, expected: i64) -> Value {
    for _ in 0..50 {
        let body: Value = server.get(&format!("/stats/{slug}")).await.json();
        if body["visits"] == expected {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("visits for {slug} never reached {expected}");
}

#[sqlx::test]
async fn test_shorten_redirect_and_count(pool: PgPool) {
    let (server, _worker) = spawn_app(pool);

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "http://example.com/long-url" }))
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    let slug = body["slug"].as_str().unwrap().to_string();
    assert_eq!(slug.len(), slug::SLUG_LENGTH);
    assert!(body["short_url"].as_str().unwrap().ends_with(&slug));

    let redirect = server.get(&format!("/{slug}")).await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(redirect.header("location"), "http://example.com/long-url");

    let stats = wait_for_visits(&server, &slug, 1).await;
    assert!(stats["last_visit"].is_string());
}

#[sqlx::test]
async fn test_burst_of_redirects_is_fully_counted(pool: PgPool) {
    let (server, _worker) = spawn_app(pool);

    let body: Value = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com/popular" }))
        .await
        .json();
    let slug = body["slug"].as_str().unwrap().to_string();

    // The worker merges these with up to 4 upserts in flight at once.
    let path = format!("/{slug}");
    for _ in 0..20 {
        assert_eq!(server.get(&path).await.status_code(), 307);
    }

    wait_for_visits(&server, &slug, 20).await;
}

#[sqlx::test]
async fn test_worker_drains_queue_on_shutdown(pool: PgPool) {
    let id = common::create_test_shortlink(&pool, "https://example.com/").await;
    let stats_service = Arc::new(StatsService::new(Arc::new(PgStatsRepository::new(
        Arc::new(pool.clone()),
    ))));
    let (tx, rx) = mpsc::channel(100);

    let worker = tokio::spawn(run_visit_worker(rx, stats_service, 2));
    for _ in 0..10 {
        tx.send(VisitEvent::now(id))
            .await
            .unwrap();
    }
    drop(tx);
    worker.await.unwrap();

    let visits: i64 =
        sqlx::query_scalar("SELECT visits FROM shortlink_stat WHERE shortlink_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(visits, 10);
}
