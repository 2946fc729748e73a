//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to redirect to. Scheme must be `http` or `https`.
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: String,
}

/// A created shortlink.
#[derive(Debug, Serialize)]
pub struct ShortlinkResponse {
    pub slug: String,
    pub short_url: String,
    pub long_url: String,
}
