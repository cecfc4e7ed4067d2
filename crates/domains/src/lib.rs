//! linkboard/crates/domains/src/lib.rs
//!
//! The central domain types, input rules and storage port for linkboard.

pub mod errors;
pub mod models;
pub mod ports;
pub mod validation;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
pub use validation::FieldError;
