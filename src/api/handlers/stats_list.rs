//! Handler for the top-N statistics ranking.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use validator::Validate;

use super::stats::to_response;
use crate::api::dto::stats::{ShortlinkStatsResponse, TopStatsParams};
use crate::application::services::stats_service::DEFAULT_TOP_LIMIT;
use crate::error::AppError;
use crate::state::AppState;

/// Lists shortlinks ranked by a visit metric.
///
/// # Endpoint
///
/// `GET /stats`
///
/// # Query Parameters
///
/// - `metric` (optional): `visits` or `last_visit` (default: `visits`)
/// - `limit` (optional): 0 to 100 (default: 10)
///
/// # Ordering
///
/// Descending by the metric. Shortlinks that were never visited take part
/// with zero visits and rank last by `last_visit`. Ties go to the newest
/// shortlink.
///
/// # Errors
///
/// Returns 422 Unprocessable Entity for an unknown metric or a limit that
/// is not an integer in range.
pub async fn stats_list_handler(
    State(state): State<AppState>,
    params: Result<Query<TopStatsParams>, QueryRejection>,
) -> Result<Json<Vec<ShortlinkStatsResponse>>, AppError> {
    let Query(params) = params?;
    params.validate()?;

    let top = state
        .stats_service
        .get_top(
            params.metric.unwrap_or_default(),
            params.limit.unwrap_or(DEFAULT_TOP_LIMIT),
        )
        .await?;

    Ok(Json(
        top.into_iter()
            .map(|stats| to_response(&state, stats))
            .collect(),
    ))
}
