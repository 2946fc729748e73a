//! Business logic services for the application layer.

pub mod shortlink_service;
pub mod stats_service;

pub use shortlink_service::ShortlinkService;
pub use stats_service::StatsService;
