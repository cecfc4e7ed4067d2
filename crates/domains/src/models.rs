//! # Domain Models
//!
//! These structs represent the core entities of linkboard.
//! Submission and comment ids are UUID v7 strings, so they sort by creation time.
//! Attribute names match the stored documents (`createdAt`, `submission_id`).

use serde::{Deserialize, Serialize};

/// A named grouping that submissions belong to. Keyed by its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Unique name, also the URL slug (e.g. "rust" for /communities/rust)
    pub title: String,
    /// Epoch milliseconds
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// A link posted into a community. The primary listed content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Title of the owning community. Not checked against the communities table.
    pub community: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// A message attached to a submission, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub message: String,
    pub submission_id: String,
    /// Records written before replies existed have no parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Form input for a new community.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCommunity {
    pub name: String,
}

/// Form input for a new submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSubmission {
    pub title: String,
    pub url: String,
    pub community: String,
}

/// Form input for a new comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComment {
    pub message: String,
    pub submission_id: String,
    pub parent_id: Option<String>,
}
