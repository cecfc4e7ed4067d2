//! Comment creation and deletion.

use crate::records::{from_document, insert_new, new_id, now_millis, to_document};
use crate::submission::SubmissionService;
use domains::errors::{DomainError, Result};
use domains::models::{Comment, NewComment};
use domains::ports::{DocumentStore, Table};
use domains::validation::validate_comment;
use std::sync::Arc;

const ENTITY: &str = "comment";

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn DocumentStore>,
    submissions: SubmissionService,
}

impl CommentService {
    pub fn new(store: Arc<dyn DocumentStore>, submissions: SubmissionService) -> Self {
        Self { store, submissions }
    }

    /// Checks run in this order: the submission reference is present, the
    /// submission exists, then the message is validated.
    pub async fn create(&self, input: NewComment) -> Result<Comment> {
        if input.submission_id.is_empty() {
            return Err(DomainError::MissingReference("submission_id"));
        }
        let submission = self.submissions.get(&input.submission_id).await?;

        let errors = validate_comment(&input.message);
        if !errors.is_empty() {
            tracing::warn!(?errors, submission_id = %submission.id, "rejected comment");
            return Err(DomainError::Validation(errors));
        }

        let comment = Comment {
            id: new_id(),
            message: input.message,
            submission_id: submission.id,
            parent_id: input.parent_id.filter(|p| !p.is_empty()),
            created_at: now_millis(),
        };
        insert_new(self.store.as_ref(), Table::Comments, ENTITY, to_document(ENTITY, &comment)?).await?;

        tracing::info!(id = %comment.id, submission_id = %comment.submission_id, "comment created");
        Ok(comment)
    }

    pub async fn get(&self, id: &str) -> Result<Comment> {
        match self.store.get(Table::Comments, id).await? {
            Some(document) => from_document(ENTITY, document),
            None => Err(DomainError::NotFound {
                entity: ENTITY,
                key: id.to_owned(),
            }),
        }
    }

    /// Deletes a comment, returning the submission it belonged to. `None`
    /// means the comment was already gone.
    pub async fn delete(&self, id: &str) -> Result<Option<String>> {
        let submission_id = match self.get(id).await {
            Ok(comment) => Some(comment.submission_id),
            Err(DomainError::NotFound { .. }) => None,
            Err(err) => return Err(err),
        };
        self.store.delete(Table::Comments, id).await?;
        tracing::info!(%id, "comment deleted");
        Ok(submission_id)
    }
}
