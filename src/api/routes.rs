//! API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler, stats_list_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shortening and statistics routes.
///
/// # Endpoints
///
/// - `POST /shorten`        - Create a shortlink
/// - `GET  /stats`          - Top-N shortlinks by visits or last visit
/// - `GET  /stats/{slug}`   - Merged statistics of one shortlink
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats", get(stats_list_handler))
        .route("/stats/{slug}", get(stats_handler))
}
