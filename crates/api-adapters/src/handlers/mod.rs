//! # Handlers
//!
//! Each handler parses the request, calls one service and renders the result.
//! Form failures re-render the form with a 422; successful writes answer
//! with a 302 to the record they touched.

pub mod comments;
pub mod communities;
pub mod health;
pub mod root;
pub mod submissions;

use crate::error::ApiError;
use crate::views::render_page;
use askama::Template;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

/// Generic message for an insert that lost to an existing key.
pub(crate) const DUPLICATE_MESSAGE: &str = "This record already exists. Please submit the form again.";

/// Renders `fragment` inside the page layout with the given status.
pub(crate) fn page<T: Template>(status: StatusCode, title: &str, fragment: &T) -> Result<Response, ApiError> {
    let html = render_page(title, fragment)?;
    Ok((status, Html(html)).into_response())
}

/// A plain `302 Found`. `Redirect::to` would answer 303.
pub(crate) fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("There is nothing at this address.".into())
}
