//! Handler for the statistics of one shortlink.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::ShortlinkStatsResponse;
use crate::domain::entities::ShortlinkWithStats;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the merged visit statistics of a shortlink.
///
/// # Endpoint
///
/// `GET /stats/{slug}`
///
/// # Response
///
/// ```json
/// {
///   "slug": "5Fq9x3ZbRkM2wTnVhA7cPe",
///   "short_url": "http://localhost:3000/5Fq9x3ZbRkM2wTnVhA7cPe",
///   "long_url": "http://example.com/long-url",
///   "visits": 1,
///   "last_visit": "2025-07-18T19:04:14.123456Z"
/// }
/// ```
///
/// A shortlink that was never visited reports `visits: 0, last_visit: null`.
///
/// # Errors
///
/// Returns 404 Not Found if the slug does not decode or is unknown.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ShortlinkStatsResponse>, AppError> {
    let shortlink = state.shortlink_service.resolve(&slug).await?;
    let stats = state.stats_service.get_one(shortlink).await?;

    Ok(Json(to_response(&state, stats)))
}

/// Flattens a shortlink and its stats into the response shape.
pub(crate) fn to_response(state: &AppState, stats: ShortlinkWithStats) -> ShortlinkStatsResponse {
    ShortlinkStatsResponse {
        slug: stats.shortlink.slug(),
        short_url: state.shortlink_service.short_url(&stats.shortlink),
        long_url: stats.shortlink.long_url,
        visits: stats.visits,
        last_visit: stats.last_visit,
    }
}
