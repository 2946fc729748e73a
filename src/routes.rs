//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`        - Shortlink redirect
//! - `POST /shorten`       - Create a shortlink
//! - `GET  /stats`         - Top-N ranking
//! - `GET  /stats/{slug}`  - Statistics of one shortlink
//! - `GET  /health`        - Health check: storage, visit queue
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::RateLimit;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with request tracing, without rate limiting or path
/// normalization.
///
/// Needs no connect info, so it can be driven directly by in-process
/// test servers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{slug}", get(redirect_handler))
        .merge(api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP budget, `None` disables rate limiting
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// # Errors
///
/// Returns an error if the rate limit configuration is invalid.
pub fn app_router(
    state: AppState,
    rate_limit: Option<RateLimit>,
    behind_proxy: bool,
) -> anyhow::Result<NormalizePath<Router>> {
    let router = router(state);

    let router = match rate_limit {
        None => router,
        Some(limit) if behind_proxy => router.layer(rate_limit::proxied_layer(limit)?),
        Some(limit) => router.layer(rate_limit::peer_layer(limit)?),
    };

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
