//! Infrastructure layer for external integrations.
//!
//! This layer implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process implementation backed by concurrent maps

pub mod memory;
pub mod persistence;
