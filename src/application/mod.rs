//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls with validation and the retry
//! policy, and give HTTP handlers and the admin CLI one API to call.
//!
//! # Available Services
//!
//! - [`services::shortlink_service::ShortlinkService`] - Shortlink creation and slug resolution
//! - [`services::stats_service::StatsService`] - Visit merging and statistics queries

pub mod services;
