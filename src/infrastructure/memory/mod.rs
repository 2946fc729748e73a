//! In-process storage backend.
//!
//! Implements the repository traits without a database. Handler tests run
//! against it. Data does not survive a restart and is not shared between
//! processes.

pub mod memory_store;

pub use memory_store::MemoryStore;
