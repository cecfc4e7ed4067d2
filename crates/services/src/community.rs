//! Community creation, lookup and cascading deletion.

use crate::records::{from_document, from_documents, insert_new, now_millis, purge_comments, to_document};
use crate::submission::{SubmissionService, SubmissionSummary};
use domains::errors::{DomainError, Result};
use domains::models::{Community, NewCommunity};
use domains::ports::{DocumentStore, Filter, Table};
use domains::validation::validate_community;
use std::sync::Arc;

const ENTITY: &str = "community";

/// A community page. `community` is `None` when submissions reference a title
/// that was never created (or has since been deleted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityListing {
    pub title: String,
    pub community: Option<Community>,
    pub submissions: Vec<SubmissionSummary>,
}

/// What a cascading delete removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub submissions_removed: usize,
    pub comments_removed: usize,
}

#[derive(Clone)]
pub struct CommunityService {
    store: Arc<dyn DocumentStore>,
    submissions: SubmissionService,
    cascade_comments: bool,
}

impl CommunityService {
    pub fn new(store: Arc<dyn DocumentStore>, cascade_comments: bool) -> Self {
        Self {
            submissions: SubmissionService::new(store.clone(), cascade_comments),
            store,
            cascade_comments,
        }
    }

    /// Every community title, alphabetically.
    pub async fn titles(&self) -> Result<Vec<String>> {
        let communities: Vec<Community> = from_documents(ENTITY, self.store.scan(Table::Communities, None).await?)?;
        let mut titles: Vec<String> = communities.into_iter().map(|c| c.title).collect();
        titles.sort();
        Ok(titles)
    }

    /// Inserts a new community. The name is the key, so a taken name is a `Duplicate`.
    pub async fn create(&self, input: NewCommunity) -> Result<Community> {
        let errors = validate_community(&input.name);
        if !errors.is_empty() {
            tracing::warn!(?errors, "rejected community");
            return Err(DomainError::Validation(errors));
        }

        let community = Community {
            title: input.name,
            created_at: now_millis(),
        };
        insert_new(
            self.store.as_ref(),
            Table::Communities,
            ENTITY,
            to_document(ENTITY, &community)?,
        )
        .await?;

        tracing::info!(title = %community.title, "community created");
        Ok(community)
    }

    pub async fn show(&self, title: &str) -> Result<CommunityListing> {
        let community = match self.store.get(Table::Communities, title).await? {
            Some(document) => Some(from_document::<Community>(ENTITY, document)?),
            None => None,
        };
        let submissions = self.submissions.in_community(title).await?;
        Ok(CommunityListing {
            title: title.to_owned(),
            community,
            submissions,
        })
    }

    /// Deletes the community and every submission filed under it.
    /// Idempotent: a missing community still sweeps matching submissions.
    ///
    /// Submission keys come from the raw documents and are collected before
    /// anything is removed.
    pub async fn delete(&self, title: &str) -> Result<DeleteReport> {
        let filter = Filter::eq("community", title);
        let ids = self
            .store
            .scan(Table::Submissions, Some(filter))
            .await?
            .iter()
            .map(|document| Table::Submissions.key_of(document))
            .collect::<std::result::Result<Vec<String>, _>>()?;

        self.store.delete(Table::Communities, title).await?;

        let mut report = DeleteReport {
            submissions_removed: ids.len(),
            ..DeleteReport::default()
        };
        if !ids.is_empty() {
            self.store.batch_delete(Table::Submissions, ids.clone()).await?;
        }
        if self.cascade_comments {
            report.comments_removed = purge_comments(self.store.as_ref(), &ids).await?;
        }

        tracing::info!(
            %title,
            submissions_removed = report.submissions_removed,
            comments_removed = report.comments_removed,
            "community deleted"
        );
        Ok(report)
    }
}
