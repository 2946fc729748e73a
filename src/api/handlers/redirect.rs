//! Handler for slug redirects.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::domain::visit_event::VisitEvent;
use crate::domain::visit_worker::submit_visit;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its long URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Decode the slug to a shortlink identifier
/// 2. Load the shortlink
/// 3. Submit a visit event to the background worker (non-blocking)
/// 4. Return 307 Temporary Redirect
///
/// The visit is merged after the response is sent; a slow or failing
/// stats write never delays or fails the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the slug does not decode or the shortlink
/// does not exist. The two cases are indistinguishable.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let shortlink = state.shortlink_service.resolve(&slug).await?;

    submit_visit(&state.visit_sender, VisitEvent::now(shortlink.id));

    Ok(Redirect::temporary(&shortlink.long_url))
}
