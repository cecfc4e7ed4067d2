use super::page;
use crate::error::ApiError;
use crate::state::AppState;
use crate::views::{FrontPageTemplate, ListingTemplate};
use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

/// `GET /`: every submission, newest first.
pub async fn index(State(state): State<AppState>) -> Result<Response, ApiError> {
    let summaries = state.services.submissions.front_page().await?;
    let listing = ListingTemplate::new(summaries).render()?;
    page(StatusCode::OK, "Front Page", &FrontPageTemplate { listing })
}
