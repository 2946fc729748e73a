//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. The only behaviour they carry is
//! derived data, such as a shortlink's slug.
//!
//! # Entity Types
//!
//! - [`Shortlink`] - A stored mapping from a generated identifier to a long URL
//! - [`ShortlinkStat`] - Merged visit statistics for one shortlink
//! - [`ShortlinkWithStats`] - A shortlink paired with its (possibly zero) stats
//! - [`StatMetric`] - The metric used to rank shortlinks
//!
//! # Design Pattern
//!
//! Records that are created separately from how they are read use a
//! dedicated input struct ([`NewShortlink`]).

pub mod shortlink;
pub mod shortlink_stat;

pub use shortlink::{NewShortlink, Shortlink};
pub use shortlink_stat::{ShortlinkStat, ShortlinkWithStats, StatMetric};
