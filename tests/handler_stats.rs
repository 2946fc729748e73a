mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use shortlink_service::api::handlers::{stats_handler, stats_list_handler};
use shortlink_service::domain::entities::NewShortlink;
use shortlink_service::domain::repositories::{ShortlinkRepository, StatsRepository};
use shortlink_service::domain::slug;
use shortlink_service::infrastructure::memory::MemoryStore;
use std::sync::Arc;
use uuid::Uuid;

fn make_server() -> (TestServer, Arc<MemoryStore>) {
    let (state, _rx, store) = common::memory_state();
    let app = Router::new()
        .route("/stats", get(stats_list_handler))
        .route("/stats/{slug}", get(stats_handler))
        .with_state(state);
    (TestServer::new(app).unwrap(), store)
}

async fn create_shortlink(store: &MemoryStore, url: &str) -> Uuid {
    store
        .create(NewShortlink {
            id: Uuid::new_v4(),
            long_url: url.to_string(),
        })
        .await
        .unwrap()
        .id
}

// ─── GET /stats/{slug} ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_never_visited_is_zero_state() {
    let (server, store) = make_server();
    let id = create_shortlink(&store, "https://example.com/").await;
    let slug = slug::encode(id);

    let response = server.get(&format!("/stats/{slug}")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["slug"], slug);
    assert_eq!(body["short_url"], format!("{}/{}", common::SERVICE_ROOT, slug));
    assert_eq!(body["long_url"], "https://example.com/");
    assert_eq!(body["visits"], 0);
    assert_eq!(body["last_visit"], Value::Null);
}

#[tokio::test]
async fn test_stats_after_visits() {
    let (server, store) = make_server();
    let id = create_shortlink(&store, "https://example.com/").await;

    store.record_visit(id, Utc::now()).await.unwrap();
    store.record_visit(id, Utc::now()).await.unwrap();

    let body: Value = server
        .get(&format!("/stats/{}", slug::encode(id)))
        .await
        .json();

    assert_eq!(body["visits"], 2);
    assert!(body["last_visit"].is_string());
}

#[tokio::test]
async fn test_stats_unknown_and_invalid_slug() {
    let (server, _) = make_server();

    for path in [
        format!("/stats/{}", slug::encode(Uuid::new_v4())),
        "/stats/invalid".to_string(),
    ] {
        let response = server.get(&path).await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body, json!({ "detail": "Not Found" }));
    }
}

// ─── GET /stats ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_list_returns_top_ten_by_visits() {
    let (server, store) = make_server();

    for visits in 0..100 {
        let id = create_shortlink(&store, &format!("https://example.com/{visits}")).await;
        for _ in 0..visits {
            store.record_visit(id, Utc::now()).await.unwrap();
        }
    }

    let response = server.get("/stats").add_query_param("limit", 10).await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    let visits: Vec<i64> = body.iter().map(|e| e["visits"].as_i64().unwrap()).collect();
    assert_eq!(visits, (90..100).rev().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_stats_list_default_limit_is_ten() {
    let (server, store) = make_server();
    for _ in 0..15 {
        create_shortlink(&store, "https://example.com/").await;
    }

    let body: Vec<Value> = server.get("/stats").await.json();

    assert_eq!(body.len(), 10);
    assert!(body.iter().all(|e| e["visits"] == 0));
}

#[tokio::test]
async fn test_stats_list_by_last_visit() {
    let (server, store) = make_server();
    let now = Utc::now();

    let older = create_shortlink(&store, "https://example.com/older").await;
    let newer = create_shortlink(&store, "https://example.com/newer").await;
    let never = create_shortlink(&store, "https://example.com/never").await;

    store.record_visit(newer, now).await.unwrap();
    store.record_visit(older, now - Duration::hours(1)).await.unwrap();
    store.record_visit(older, now - Duration::hours(2)).await.unwrap();

    let body: Vec<Value> = server
        .get("/stats")
        .add_query_param("metric", "last_visit")
        .await
        .json();

    let slugs: Vec<&str> = body.iter().map(|e| e["slug"].as_str().unwrap()).collect();
    assert_eq!(
        slugs,
        vec![
            slug::encode(newer),
            slug::encode(older),
            slug::encode(never)
        ]
    );
    assert_eq!(body[1]["visits"], 2);
    assert_eq!(body[2]["last_visit"], Value::Null);
}

#[tokio::test]
async fn test_stats_list_zero_limit() {
    let (server, store) = make_server();
    create_shortlink(&store, "https://example.com/").await;

    let body: Vec<Value> = server.get("/stats").add_query_param("limit", 0).await.json();

    assert!(body.is_empty());
}

#[tokio::test]
async fn test_stats_list_rejects_invalid_params() {
    let (server, _) = make_server();

    for (key, value) in [
        ("metric", "clicks"),
        ("limit", "101"),
        ("limit", "-1"),
        ("limit", "ten"),
    ] {
        let response = server.get("/stats").add_query_param(key, value).await;

        assert_eq!(response.status_code(), 422, "{key}={value}");
    }
}
