//! Handler for the shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use tracing::info;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortlinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortlink for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "http://example.com/long-url" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "slug": "5Fq9x3ZbRkM2wTnVhA7cPe",
///   "short_url": "http://localhost:3000/5Fq9x3ZbRkM2wTnVhA7cPe",
///   "long_url": "http://example.com/long-url"
/// }
/// ```
///
/// # Errors
///
/// Returns 422 Unprocessable Entity if the body is missing or malformed,
/// or the URL is invalid or uses a scheme other than `http`/`https`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortlinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let shortlink = state.shortlink_service.create(&payload.long_url).await?;
    let slug = shortlink.slug();

    info!(%slug, long_url = %shortlink.long_url, "Shortlink created");

    Ok((
        StatusCode::CREATED,
        Json(ShortlinkResponse {
            short_url: state.shortlink_service.short_url(&shortlink),
            slug,
            long_url: shortlink.long_url,
        }),
    ))
}
