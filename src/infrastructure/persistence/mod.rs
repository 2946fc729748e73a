//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits on SQLx,
//! using bound parameters for every value.
//!
//! # Repositories
//!
//! - [`PgShortlinkRepository`] - Shortlink storage and lookup
//! - [`PgStatsRepository`] - Atomic visit merging and ranking queries

pub mod pg_shortlink_repository;
pub mod pg_stats_repository;

pub use pg_shortlink_repository::PgShortlinkRepository;
pub use pg_stats_repository::PgStatsRepository;
