//! Askama templates and the view models they render.
//!
//! Every page is rendered in two steps: the page-specific fragment first,
//! then [`PageTemplate`] wraps it in the shared layout. Template variables
//! are HTML-escaped; only the pre-rendered fragment is inserted raw.

use askama::Template;
use domains::models::Comment;
use services::SubmissionSummary;
use std::collections::{HashMap, HashSet};

/// Replies deeper than this render at the same indent.
const MAX_INDENT_DEPTH: usize = 8;

pub fn community_path(title: &str) -> String {
    format!("/communities/{}", urlencoding::encode(title))
}

pub fn submission_path(id: &str) -> String {
    format!("/submissions/{}", urlencoding::encode(id))
}

pub fn comment_path(id: &str) -> String {
    format!("/comments/{}", urlencoding::encode(id))
}

pub fn new_submission_path(community: &str) -> String {
    format!("/submissions/new?community={}", urlencoding::encode(community))
}

pub fn new_comment_path(submission_id: &str, parent_id: Option<&str>) -> String {
    let mut path = format!("/comments/new?submission_id={}", urlencoding::encode(submission_id));
    if let Some(parent) = parent_id {
        path.push_str("&parent_id=");
        path.push_str(&urlencoding::encode(parent));
    }
    path
}

pub fn comments_label(count: usize) -> String {
    match count {
        1 => "1 comment".to_string(),
        n => format!("{n} comments"),
    }
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Renders `fragment` and wraps it in the site layout.
pub fn render_page<T: Template>(title: &str, fragment: &T) -> askama::Result<String> {
    let body = fragment.render()?;
    PageTemplate { title, body: &body }.render()
}

/// One row of a submission listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    pub title: String,
    pub url: String,
    pub community: String,
    pub community_href: String,
    pub detail_href: String,
    pub comments_label: String,
}

impl From<SubmissionSummary> for SubmissionRow {
    fn from(summary: SubmissionSummary) -> Self {
        let submission = summary.submission;
        Self {
            community_href: community_path(&submission.community),
            detail_href: submission_path(&submission.id),
            comments_label: comments_label(summary.comment_count),
            title: submission.title,
            url: submission.url,
            community: submission.community,
        }
    }
}

#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub rows: Vec<SubmissionRow>,
}

impl ListingTemplate {
    pub fn new(summaries: Vec<SubmissionSummary>) -> Self {
        Self {
            rows: summaries.into_iter().map(SubmissionRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "front.html")]
pub struct FrontPageTemplate {
    /// Pre-rendered [`ListingTemplate`].
    pub listing: String,
}

#[derive(Template)]
#[template(path = "community.html")]
pub struct CommunityTemplate {
    pub title: String,
    pub exists: bool,
    pub listing: String,
    pub new_submission_href: String,
    pub delete_action: String,
}

#[derive(Template)]
#[template(path = "community_form.html")]
pub struct CommunityFormTemplate<'a> {
    pub name: &'a str,
    pub name_error: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityOption {
    pub title: String,
    pub selected: bool,
}

/// Builds the community `<select>` with `selected` marked.
///
/// A non-empty `selected` that is not among `titles` (a free-form community
/// typed into a submission) is kept as its own option so a re-rendered form
/// does not lose it.
pub fn community_options(titles: Vec<String>, selected: &str) -> Vec<CommunityOption> {
    let mut options: Vec<CommunityOption> = titles
        .into_iter()
        .map(|title| CommunityOption {
            selected: title == selected,
            title,
        })
        .collect();
    if !selected.is_empty() && !options.iter().any(|option| option.selected) {
        options.push(CommunityOption {
            title: selected.to_string(),
            selected: true,
        });
        options.sort_by(|a, b| a.title.cmp(&b.title));
    }
    options
}

#[derive(Template)]
#[template(path = "submission_form.html")]
pub struct SubmissionFormTemplate<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub options: Vec<CommunityOption>,
    pub title_error: Option<&'a str>,
    pub url_error: Option<&'a str>,
    pub community_error: Option<&'a str>,
    pub form_error: Option<&'a str>,
}

/// A comment positioned in its thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub id: String,
    pub message: String,
    pub depth: usize,
    /// Left margin in `em`.
    pub indent: usize,
    pub reply_href: String,
    pub delete_action: String,
}

/// Orders comments depth-first so replies follow their parent.
///
/// Siblings keep their incoming (oldest first) order. A comment whose parent
/// is not in the list is treated as top-level.
pub fn thread_comments(comments: &[Comment]) -> Vec<CommentRow> {
    let known: HashSet<&str> = comments.iter().map(|c| c.id.as_str()).collect();
    let mut children: HashMap<&str, Vec<&Comment>> = HashMap::new();
    let mut roots = Vec::new();
    for comment in comments {
        match comment.parent_id.as_deref() {
            Some(parent) if known.contains(parent) && parent != comment.id => {
                children.entry(parent).or_default().push(comment)
            }
            _ => roots.push(comment),
        }
    }

    let mut out = Vec::with_capacity(comments.len());
    let mut visited = HashSet::new();
    let mut stack: Vec<(&Comment, usize)> = roots.into_iter().rev().map(|c| (c, 0)).collect();
    loop {
        while let Some((comment, depth)) = stack.pop() {
            if !visited.insert(comment.id.as_str()) {
                continue;
            }
            out.push(comment_row(comment, depth));
            if let Some(replies) = children.get(comment.id.as_str()) {
                stack.extend(replies.iter().rev().map(|c| (*c, depth + 1)));
            }
        }
        // Parent cycles never reach a root; surface them top-level.
        match comments.iter().find(|c| !visited.contains(c.id.as_str())) {
            Some(orphan) => stack.push((orphan, 0)),
            None => break,
        }
    }
    out
}

fn comment_row(comment: &Comment, depth: usize) -> CommentRow {
    CommentRow {
        id: comment.id.clone(),
        message: comment.message.clone(),
        depth,
        indent: depth.min(MAX_INDENT_DEPTH) * 2,
        reply_href: new_comment_path(&comment.submission_id, Some(&comment.id)),
        delete_action: comment_path(&comment.id),
    }
}

#[derive(Template)]
#[template(path = "submission.html")]
pub struct SubmissionTemplate {
    pub title: String,
    pub url: String,
    pub community: String,
    pub community_href: String,
    pub comment_href: String,
    pub delete_action: String,
    pub comments: Vec<CommentRow>,
}

#[derive(Template)]
#[template(path = "comment_form.html")]
pub struct CommentFormTemplate<'a> {
    pub submission_id: &'a str,
    pub submission_title: &'a str,
    pub parent_id: Option<&'a str>,
    pub message: &'a str,
    pub message_error: Option<&'a str>,
    pub form_error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub status: u16,
    pub reason: &'a str,
    pub detail: &'a str,
}
