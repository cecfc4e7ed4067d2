//! HTTP error mapping.
//!
//! [`ApiError`] renders the HTML error page; [`JsonError`] wraps it for the
//! JSON endpoint. Internal failures are logged here and never shown verbatim.

use crate::views::{render_page, ErrorTemplate};
use axum::{
    extract::rejection::{FormRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use domains::DomainError;
use serde::Serialize;
use thiserror::Error;

const INTERNAL_DETAIL: &str = "Something went wrong on our side. Please try again.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    /// An extractor refused the request before it reached a handler.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the JSON body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unprocessable(_) => "UNPROCESSABLE",
            ApiError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiError::Rejected { status, .. } if *status == StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                "UNSUPPORTED_MEDIA_TYPE"
            }
            ApiError::Rejected { .. } => "BAD_REQUEST",
            ApiError::Render(_) | ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The text shown to the client.
    fn public_message(&self) -> String {
        match self {
            ApiError::Render(_) | ApiError::Internal(_) => INTERNAL_DETAIL.to_string(),
            other => other.to_string(),
        }
    }

    fn log(&self) {
        match self {
            ApiError::Render(err) => tracing::error!(error = %err, "template rendering failed"),
            ApiError::Internal(msg) => tracing::error!(error = %msg, "request failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, key } => ApiError::NotFound(format!("No {entity} found for {key:?}.")),
            DomainError::MissingReference(field) => ApiError::Unprocessable(format!("{field} is required.")),
            DomainError::Validation(errors) => ApiError::Unprocessable(
                errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
            ),
            DomainError::Duplicate { entity, .. } => ApiError::Unprocessable(format!("That {entity} already exists.")),
            err @ (DomainError::Store(_) | DomainError::CorruptRecord { .. }) => ApiError::Internal(err.to_string()),
        }
    }
}

macro_rules! from_rejection {
    ($($rejection:ty),+) => {
        $(impl From<$rejection> for ApiError {
            fn from(rejection: $rejection) -> Self {
                ApiError::Rejected {
                    status: rejection.status(),
                    detail: rejection.body_text(),
                }
            }
        })+
    };
}

from_rejection!(FormRejection, PathRejection, QueryRejection);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let detail = self.public_message();
        let template = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            detail: &detail,
        };
        let no_store = [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))];

        match render_page("Error", &template) {
            Ok(page) => (status, no_store, Html(page)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "error page failed to render");
                (status, no_store, detail).into_response()
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

/// An [`ApiError`] rendered as `{"error": .., "code": ..}`.
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl From<ApiError> for JsonError {
    fn from(err: ApiError) -> Self {
        JsonError(err)
    }
}

impl From<DomainError> for JsonError {
    fn from(err: DomainError) -> Self {
        JsonError(err.into())
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let JsonError(err) = self;
        err.log();
        let body = ErrorResponse {
            error: err.public_message(),
            code: err.code(),
        };
        (err.status(), Json(body)).into_response()
    }
}
