//! # storage-adapters
//!
//! Implementations of the `DocumentStore` port.
//! `MemoryStore` is always compiled; `SqliteStore` sits behind `db-sqlite`.

pub mod memory;
#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteStore;
