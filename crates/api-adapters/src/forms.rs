//! Form bodies and query strings, using the bracketed field names the HTML
//! forms post (`community[name]` and friends). Absent fields default to empty
//! so the validators decide what is missing.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CommunityForm {
    #[serde(rename = "community[name]", default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionForm {
    #[serde(rename = "submission[title]", default)]
    pub title: String,
    #[serde(rename = "submission[url]", default)]
    pub url: String,
    #[serde(rename = "submission[community]", default)]
    pub community: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    #[serde(rename = "comment[message]", default)]
    pub message: String,
    #[serde(rename = "comment[submission_id]", default)]
    pub submission_id: String,
    #[serde(rename = "comment[parent_id]", default)]
    pub parent_id: Option<String>,
}

/// `_method=delete` lets a plain HTML form reach a DELETE route.
#[derive(Debug, Default, Deserialize)]
pub struct MethodOverride {
    #[serde(rename = "_method", default)]
    pub method: String,
}

impl MethodOverride {
    pub fn is_delete(&self) -> bool {
        self.method.eq_ignore_ascii_case("delete")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewSubmissionQuery {
    pub community: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewCommentQuery {
    pub submission_id: Option<String>,
    pub parent_id: Option<String>,
}
