//! Field rules for user input.
//!
//! Every validator returns the failing fields in a fixed order. An empty list
//! means the input is acceptable. Lengths are counted in chars, input is not trimmed.

use serde::Serialize;

pub const COMMUNITY_NAME_MIN: usize = 4;
pub const SUBMISSION_TITLE_MIN: usize = 5;
pub const COMMENT_MESSAGE_MIN: usize = 1;

/// A single rejected form field and the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Looks up the message for `field`, if that field failed.
pub fn message_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

fn too_short(min: usize) -> String {
    let unit = if min == 1 { "character" } else { "characters" };
    format!("is too short (minimum is {min} {unit})")
}

pub fn validate_community(name: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if name.chars().count() < COMMUNITY_NAME_MIN {
        errors.push(FieldError::new("name", too_short(COMMUNITY_NAME_MIN)));
    }
    errors
}

pub fn validate_submission(title: &str, url: &str, community: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if community.is_empty() {
        errors.push(FieldError::new("community", "invalid community"));
    }
    if title.chars().count() < SUBMISSION_TITLE_MIN {
        errors.push(FieldError::new("title", too_short(SUBMISSION_TITLE_MIN)));
    }
    if !url.starts_with("http") {
        errors.push(FieldError::new("url", "is not a valid URL"));
    }
    errors
}

pub fn validate_comment(message: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if message.chars().count() < COMMENT_MESSAGE_MIN {
        errors.push(FieldError::new("message", too_short(COMMENT_MESSAGE_MIN)));
    }
    errors
}
