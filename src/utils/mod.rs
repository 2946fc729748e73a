//! Utility functions for identifier generation, URL validation, and retries.
//!
//! - [`id_generator`] - Random 128-bit identifiers for new shortlinks
//! - [`url_validator`] - Destination URL parsing and scheme allow-listing
//! - [`retry`] - Retry-once policy for transient storage conflicts

pub mod id_generator;
pub mod retry;
pub mod url_validator;
