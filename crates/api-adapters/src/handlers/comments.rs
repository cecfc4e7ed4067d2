use super::{found, page, DUPLICATE_MESSAGE};
use crate::error::ApiError;
use crate::extract::{Form, Path, Query};
use crate::forms::{CommentForm, MethodOverride, NewCommentQuery};
use crate::state::AppState;
use crate::views::{self, CommentFormTemplate};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use domains::models::NewComment;
use domains::validation::message_for;
use domains::DomainError;

const FORM_TITLE: &str = "New Comment";

/// `GET /comments/new?submission_id=..[&parent_id=..]`.
pub async fn new_form(
    State(state): State<AppState>,
    Query(query): Query<NewCommentQuery>,
) -> Result<Response, ApiError> {
    let submission_id = query.submission_id.unwrap_or_default();
    if submission_id.is_empty() {
        return Err(DomainError::MissingReference("submission_id").into());
    }
    let submission = state.services.submissions.get(&submission_id).await?;
    page(
        StatusCode::OK,
        FORM_TITLE,
        &CommentFormTemplate {
            submission_id: &submission.id,
            submission_title: &submission.title,
            parent_id: query.parent_id.as_deref().filter(|p| !p.is_empty()),
            message: "",
            message_error: None,
            form_error: None,
        },
    )
}

pub async fn create(State(state): State<AppState>, Form(form): Form<CommentForm>) -> Result<Response, ApiError> {
    let input = NewComment {
        message: form.message.clone(),
        submission_id: form.submission_id.clone(),
        parent_id: form.parent_id.clone(),
    };
    let errors = match state.services.comments.create(input).await {
        Ok(comment) => return Ok(found(views::submission_path(&comment.submission_id))),
        Err(DomainError::Validation(errors)) => errors,
        Err(DomainError::Duplicate { .. }) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    let submission = state.services.submissions.get(&form.submission_id).await?;
    let template = CommentFormTemplate {
        submission_id: &submission.id,
        submission_title: &submission.title,
        parent_id: form.parent_id.as_deref().filter(|p| !p.is_empty()),
        message: &form.message,
        message_error: message_for(&errors, "message"),
        form_error: errors.is_empty().then_some(DUPLICATE_MESSAGE),
    };
    page(StatusCode::UNPROCESSABLE_ENTITY, FORM_TITLE, &template)
}

/// Redirects to the comment's submission, or to `/` if it was already gone.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let location = match state.services.comments.delete(&id).await? {
        Some(submission_id) => views::submission_path(&submission_id),
        None => "/".to_string(),
    };
    Ok(found(location))
}

/// `POST /comments/{id}` with `_method=delete`.
pub async fn destroy_via_form(
    state: State<AppState>,
    id: Path<String>,
    Form(method): Form<MethodOverride>,
) -> Result<Response, ApiError> {
    if !method.is_delete() {
        return Err(ApiError::MethodNotAllowed);
    }
    destroy(state, id).await
}
