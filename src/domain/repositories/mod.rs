//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data access
//! operations following the Repository pattern. These traits are implemented by
//! concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ShortlinkRepository`] - Shortlink storage and lookup
//! - [`StatsRepository`] - Atomic visit merging and statistics queries
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod shortlink_repository;
pub mod stats_repository;

pub use shortlink_repository::ShortlinkRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use shortlink_repository::MockShortlinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
