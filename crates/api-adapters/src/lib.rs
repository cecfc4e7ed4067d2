//! # api-adapters
//!
//! The HTML front end of linkboard. Templates and view models live in
//! [`views`] and compile without a web framework; everything that speaks
//! HTTP sits behind the `web-axum` feature.

pub mod metrics;
pub mod views;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod forms;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod routes;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use error::{ApiError, JsonError};
#[cfg(feature = "web-axum")]
pub use routes::create_router;
#[cfg(feature = "web-axum")]
pub use state::AppState;
