use super::{found, page, DUPLICATE_MESSAGE};
use crate::error::ApiError;
use crate::extract::{Form, Path, Query};
use crate::forms::{MethodOverride, NewSubmissionQuery, SubmissionForm};
use crate::state::AppState;
use crate::views::{self, community_options, SubmissionFormTemplate, SubmissionTemplate};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use domains::models::NewSubmission;
use domains::validation::message_for;
use domains::DomainError;

const FORM_TITLE: &str = "New Submission";

/// `GET /submissions/new`, optionally preselecting `?community=`.
pub async fn new_form(
    State(state): State<AppState>,
    Query(query): Query<NewSubmissionQuery>,
) -> Result<Response, ApiError> {
    let titles = state.services.communities.titles().await?;
    let selected = query.community.unwrap_or_default();
    page(
        StatusCode::OK,
        FORM_TITLE,
        &SubmissionFormTemplate {
            title: "",
            url: "",
            options: community_options(titles, &selected),
            title_error: None,
            url_error: None,
            community_error: None,
            form_error: None,
        },
    )
}

pub async fn create(State(state): State<AppState>, Form(form): Form<SubmissionForm>) -> Result<Response, ApiError> {
    let input = NewSubmission {
        title: form.title.clone(),
        url: form.url.clone(),
        community: form.community.clone(),
    };
    let errors = match state.services.submissions.create(input).await {
        Ok(submission) => return Ok(found(views::submission_path(&submission.id))),
        Err(DomainError::Validation(errors)) => errors,
        Err(DomainError::Duplicate { .. }) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    let titles = state.services.communities.titles().await?;
    let template = SubmissionFormTemplate {
        title: &form.title,
        url: &form.url,
        options: community_options(titles, &form.community),
        title_error: message_for(&errors, "title"),
        url_error: message_for(&errors, "url"),
        community_error: message_for(&errors, "community"),
        form_error: errors.is_empty().then_some(DUPLICATE_MESSAGE),
    };
    page(StatusCode::UNPROCESSABLE_ENTITY, FORM_TITLE, &template)
}

/// `GET /submissions/{id}` with its comment thread.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let thread = state.services.submissions.show(&id).await?;
    let submission = thread.submission;
    let template = SubmissionTemplate {
        comments: views::thread_comments(&thread.comments),
        community_href: views::community_path(&submission.community),
        comment_href: views::new_comment_path(&submission.id, None),
        delete_action: views::submission_path(&submission.id),
        title: submission.title,
        url: submission.url,
        community: submission.community,
    };
    page(StatusCode::OK, &template.title, &template)
}

pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    state.services.submissions.delete(&id).await?;
    Ok(found("/".to_string()))
}

/// `POST /submissions/{id}` with `_method=delete`.
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
