//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, the visit worker, and the
//! Axum server lifecycle including graceful shutdown.

use crate::config::Config;
use crate::domain::visit_worker::run_visit_worker;
use crate::infrastructure::persistence::{PgShortlinkRepository, PgStatsRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Creates the PostgreSQL connection pool from the pool settings.
///
/// # Errors
///
/// Returns an error if the first connection cannot be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Background visit worker
/// - Axum HTTP server
///
/// On Ctrl-C or SIGTERM the server stops accepting connections, finishes
/// in-flight requests, and then waits for the visit worker to merge every
/// queued visit before returning.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let shortlink_repository = Arc::new(PgShortlinkRepository::new(pool.clone()));
    let stats_repository = Arc::new(PgStatsRepository::new(pool.clone()));

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);
    let state = AppState::new(
        shortlink_repository,
        stats_repository,
        config.service_root.clone(),
        visit_tx,
    );

    let worker = tokio::spawn(run_visit_worker(
        visit_rx,
        state.stats_service.clone(),
        config.visit_worker_concurrency,
    ));
    tracing::info!("Visit worker started");

    let app = app_router(state, config.rate_limit, config.behind_proxy)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router, and with it the last visit sender, is dropped once serve returns.
    tracing::info!("Server stopped, draining visit queue");
    worker.await.context("Visit worker panicked")?;

    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
