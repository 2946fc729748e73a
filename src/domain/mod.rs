//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and domain services independent of
//! infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`slug`] - Reversible identifier to slug codec
//! - [`visit_event`] - Visit tracking event model
//! - [`visit_worker`] - Asynchronous visit merging worker
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Visit Processing Flow
//!
//! 1. HTTP handler resolves a slug and returns the redirect
//! 2. [`visit_event::VisitEvent`] is submitted to an async channel
//! 3. [`visit_worker::run_visit_worker`] hands each event to
//!    [`crate::application::services::StatsService::record_visit`] (retry-once)
//! 4. Stats are upserted atomically via [`repositories::StatsRepository`]

pub mod entities;
pub mod repositories;
pub mod slug;
pub mod visit_event;
pub mod visit_worker;
