use super::{found, page};
use crate::error::{ApiError, JsonError};
use crate::extract::{Form, Path};
use crate::forms::{CommunityForm, MethodOverride};
use crate::state::AppState;
use crate::views::{self, CommunityFormTemplate, CommunityTemplate, ListingTemplate};
use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use domains::models::NewCommunity;
use domains::validation::message_for;
use domains::DomainError;

const FORM_TITLE: &str = "New Community";

/// `GET /communities`: every title, sorted, as JSON.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<String>>, JsonError> {
    Ok(Json(state.services.communities.titles().await?))
}

pub async fn new_form() -> Result<Response, ApiError> {
    page(
        StatusCode::OK,
        FORM_TITLE,
        &CommunityFormTemplate {
            name: "",
            name_error: None,
        },
    )
}

pub async fn create(State(state): State<AppState>, Form(form): Form<CommunityForm>) -> Result<Response, ApiError> {
    let input = NewCommunity {
        name: form.name.clone(),
    };
    match state.services.communities.create(input).await {
        Ok(community) => Ok(found(views::community_path(&community.title))),
        Err(DomainError::Validation(errors)) => page(
            StatusCode::UNPROCESSABLE_ENTITY,
            FORM_TITLE,
            &CommunityFormTemplate {
                name: &form.name,
                name_error: message_for(&errors, "name"),
            },
        ),
        Err(DomainError::Duplicate { .. }) => page(
            StatusCode::UNPROCESSABLE_ENTITY,
            FORM_TITLE,
            &CommunityFormTemplate {
                name: &form.name,
                name_error: Some("has already been taken"),
            },
        ),
        Err(err) => Err(err.into()),
    }
}

/// `GET /communities/{name}`. Renders even if only submissions mention the name.
pub async fn show(State(state): State<AppState>, Path(name): Path<String>) -> Result<Response, ApiError> {
    let listing = state.services.communities.show(&name).await?;
    let template = CommunityTemplate {
        exists: listing.community.is_some(),
        listing: ListingTemplate::new(listing.submissions).render()?,
        new_submission_href: views::new_submission_path(&listing.title),
        delete_action: views::community_path(&listing.title),
        title: listing.title,
    };
    page(StatusCode::OK, &name, &template)
}

pub async fn destroy(State(state): State<AppState>, Path(name): Path<String>) -> Result<Response, ApiError> {
    state.services.communities.delete(&name).await?;
    Ok(found("/".to_string()))
}

/// `POST /communities/{name}` with `_method=delete`.
pub async fn destroy_via_form(
    state: State<AppState>,
    name: Path<String>,
    Form(method): Form<MethodOverride>,
) -> Result<Response, ApiError> {
    if !method.is_delete() {
        return Err(ApiError::MethodNotAllowed);
    }
    destroy(state, name).await
}
