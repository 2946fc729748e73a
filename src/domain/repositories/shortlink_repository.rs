//! Repository trait for shortlink data access.

use crate::domain::entities::{NewShortlink, Shortlink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for storing and loading shortlinks.
///
/// Shortlinks are insert-only: there is no update or delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortlinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_shortlink.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortlinkRepository: Send + Sync {
    /// Stores a new shortlink and returns it with its creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the identifier is already taken.
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on storage errors.
    async fn create(&self, new_shortlink: NewShortlink) -> Result<Shortlink, AppError>;

    /// Finds a shortlink by its identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Shortlink))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Shortlink>, AppError>;

    /// Counts all stored shortlinks.
    async fn count(&self) -> Result<i64, AppError>;

    /// Checks that the storage answers, at constant cost.
    async fn ping(&self) -> Result<(), AppError>;
}
