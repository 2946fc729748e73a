//! Shortlink creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::{NewShortlink, Shortlink};
use crate::domain::repositories::ShortlinkRepository;
use crate::domain::slug;
use crate::error::AppError;
use crate::utils::id_generator::generate_id;
use crate::utils::retry::retry_once_on_conflict;
use crate::utils::url_validator::parse_long_url;

/// Source of fresh shortlink identifiers.
pub type IdGenerator = fn() -> Result<Uuid, getrandom::Error>;

/// Service for creating shortlinks and resolving slugs back to them.
///
/// Identifiers come from a cryptographically strong random source and are
/// never checked against storage up front. The primary key is the backstop:
/// a collision surfaces as [`AppError::Conflict`] and creation is retried
/// once with a fresh identifier.
pub struct ShortlinkService<R: ShortlinkRepository + ?Sized> {
    repository: Arc<R>,
    service_root: String,
    id_generator: IdGenerator,
}

impl<R: ShortlinkRepository + ?Sized> ShortlinkService<R> {
    /// Creates a new shortlink service.
    ///
    /// `service_root` is the public base URL short URLs are built on,
    /// e.g. `https://s.example.com`.
    pub fn new(repository: Arc<R>, service_root: impl Into<String>) -> Self {
        Self::with_id_generator(repository, service_root, generate_id)
    }

    /// Creates a service with a custom identifier source.
    pub fn with_id_generator(
        repository: Arc<R>,
        service_root: impl Into<String>,
        id_generator: IdGenerator,
    ) -> Self {
        let service_root = service_root.into().trim_end_matches('/').to_string();

        Self {
            repository,
            service_root,
            id_generator,
        }
    }

    /// Validates `long_url` and stores a new shortlink for it.
    ///
    /// Every call creates a new shortlink; equal URLs are not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is malformed, has no host,
    /// or uses a scheme other than `http`/`https`.
    /// Returns [`AppError::Conflict`] if two generated identifiers in a row collide.
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on storage errors.
    pub async fn create(&self, long_url: &str) -> Result<Shortlink, AppError> {
        let long_url = parse_long_url(long_url).map_err(|e| {
            AppError::validation(
                e.to_string(),
                json!([{ "loc": ["body", "long_url"], "msg": e.to_string() }]),
            )
        })?;

        let repository = &self.repository;
        let id_generator = self.id_generator;

        retry_once_on_conflict(|| {
            let long_url = long_url.clone();
            async move {
                let id = id_generator().map_err(|e| {
                    AppError::internal(
                        "Random source unavailable",
                        json!({ "error": e.to_string() }),
                    )
                })?;

                repository.create(NewShortlink { id, long_url }).await
            }
        })
        .await
    }

    /// Resolves a slug to its shortlink.
    ///
    /// A slug that does not decode and a slug of an unknown shortlink both
    /// return the same error, so callers cannot tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is invalid or unknown.
    pub async fn resolve(&self, slug: &str) -> Result<Shortlink, AppError> {
        let not_found = || AppError::not_found("Shortlink not found", json!({ "slug": slug }));

        let Ok(id) = slug::decode(slug) else {
            debug!(slug, "Slug failed to decode");
            return Err(not_found());
        };

        self.repository.find_by_id(id).await?.ok_or_else(not_found)
    }

    /// Builds the public short URL of a shortlink.
    pub fn short_url(&self, shortlink: &Shortlink) -> String {
        format!("{}/{}", self.service_root, shortlink.slug())
    }

    /// Counts all stored shortlinks.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Checks that storage is reachable without scanning any table.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
