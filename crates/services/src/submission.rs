//! Submission listing, creation, detail and deletion.

use crate::records::{
    from_document, from_documents, insert_new, new_id, now_millis, purge_comments, sort_newest_first,
    sort_oldest_first, to_document,
};
use domains::errors::{DomainError, Result};
use domains::models::{Comment, NewSubmission, Submission};
use domains::ports::{DocumentStore, Filter, Table};
use domains::validation::validate_submission;
use std::collections::HashMap;
use std::sync::Arc;

const ENTITY: &str = "submission";

/// A listing row: the submission plus how many comments it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub submission: Submission,
    pub comment_count: usize,
}

/// A submission with its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionThread {
    pub submission: Submission,
    pub comments: Vec<Comment>,
}

#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn DocumentStore>,
    cascade_comments: bool,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn DocumentStore>, cascade_comments: bool) -> Self {
        Self { store, cascade_comments }
    }

    /// Every submission, newest first. Full-table scan.
    pub async fn front_page(&self) -> Result<Vec<SubmissionSummary>> {
        let submissions = from_documents(ENTITY, self.store.scan(Table::Submissions, None).await?)?;
        self.summarize(submissions).await
    }

    /// Submissions whose `community` equals `community`, newest first.
    pub async fn in_community(&self, community: &str) -> Result<Vec<SubmissionSummary>> {
        let filter = Filter::eq("community", community);
        let submissions = from_documents(ENTITY, self.store.scan(Table::Submissions, Some(filter)).await?)?;
        self.summarize(submissions).await
    }

    /// Sorts and attaches comment counts using one scan of the comments table.
    async fn summarize(&self, mut submissions: Vec<Submission>) -> Result<Vec<SubmissionSummary>> {
        sort_newest_first(&mut submissions);
        if submissions.is_empty() {
            return Ok(Vec::new());
        }

        let comments: Vec<Comment> = from_documents("comment", self.store.scan(Table::Comments, None).await?)?;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for comment in comments {
            *counts.entry(comment.submission_id).or_default() += 1;
        }

        Ok(submissions
            .into_iter()
            .map(|submission| SubmissionSummary {
                comment_count: counts.get(&submission.id).copied().unwrap_or(0),
                submission,
            })
            .collect())
    }

    pub async fn create(&self, input: NewSubmission) -> Result<Submission> {
        let errors = validate_submission(&input.title, &input.url, &input.community);
        if !errors.is_empty() {
            tracing::warn!(?errors, "rejected submission");
            return Err(DomainError::Validation(errors));
        }

        let submission = Submission {
            id: new_id(),
            title: input.title,
            url: input.url,
            community: input.community,
            created_at: now_millis(),
        };
        insert_new(
            self.store.as_ref(),
            Table::Submissions,
            ENTITY,
            to_document(ENTITY, &submission)?,
        )
        .await?;

        tracing::info!(id = %submission.id, community = %submission.community, "submission created");
        Ok(submission)
    }

    pub async fn get(&self, id: &str) -> Result<Submission> {
        match self.store.get(Table::Submissions, id).await? {
            Some(document) => from_document(ENTITY, document),
            None => Err(DomainError::NotFound {
                entity: ENTITY,
                key: id.to_owned(),
            }),
        }
    }

    pub async fn show(&self, id: &str) -> Result<SubmissionThread> {
        let submission = self.get(id).await?;
        let filter = Filter::eq("submission_id", id);
        let mut comments: Vec<Comment> =
            from_documents("comment", self.store.scan(Table::Comments, Some(filter)).await?)?;
        sort_oldest_first(&mut comments);
        Ok(SubmissionThread { submission, comments })
    }

    /// Idempotent. Comments stay behind unless comment cascading is enabled.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(Table::Submissions, id).await?;
        let purged = if self.cascade_comments {
            purge_comments(self.store.as_ref(), &[id.to_owned()]).await?
        } else {
            0
        };
        tracing::info!(%id, comments_removed = purged, "submission deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ports::{MockDocumentStore, StoreError, WriteCondition};
    use serde_json::json;
    use storage_adapters::MemoryStore;

    fn service(store: Arc<dyn DocumentStore>) -> SubmissionService {
        SubmissionService::new(store, false)
    }

    fn input(title: &str, url: &str, community: &str) -> NewSubmission {
        NewSubmission {
            title: title.into(),
            url: url.into(),
            community: community.into(),
        }
    }

    async fn seed(store: &MemoryStore, id: &str, community: &str, created_at: i64) {
        let document = json!({
            "id": id,
            "title": format!("title {id}"),
            "url": "http://x.com",
            "community": community,
            "createdAt": created_at,
        });
        store
            .put(Table::Submissions, document.as_object().cloned().unwrap(), WriteCondition::KeyAbsent)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn created_submission_reads_back_unchanged() {
        let submissions = service(Arc::new(MemoryStore::new()));
        let created = submissions
            .create(input("Hello there", "http://x.com", "devs"))
            .await
            .unwrap();

        let thread = submissions.show(&created.id).await.unwrap();
        assert_eq!(thread.submission, created);
        assert_eq!(thread.submission.title, "Hello there");
        assert_eq!(thread.submission.url, "http://x.com");
        assert_eq!(thread.submission.community, "devs");
        assert!(thread.comments.is_empty());
    }

    #[tokio::test]
    async fn every_create_gets_a_fresh_id() {
        let submissions = service(Arc::new(MemoryStore::new()));
        let a = submissions.create(input("Hello there", "http://x.com", "devs")).await.unwrap();
        let b = submissions.create(input("Hello there", "http://x.com", "devs")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(submissions.front_page().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_store() {
        let mut store = MockDocumentStore::new();
        store.expect_put().never();

        let err = service(Arc::new(store))
            .create(input("Hi", "http://x.com", "devs"))
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "title");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_submission_is_not_found() {
        let submissions = service(Arc::new(MemoryStore::new()));
        let err = submissions.show("nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "submission", .. }));
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let mut store = MockDocumentStore::new();
        store
            .expect_scan()
            .returning(|_, _| Err(StoreError::Backend("connection reset".into())));

        let err = service(Arc::new(store)).front_page().await.unwrap_err();
        assert!(matches!(err, DomainError::Store(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn listings_are_newest_first_with_comment_counts() {
        let store = Arc::new(MemoryStore::new());
        seed(&store, "a", "rust", 100).await;
        seed(&store, "b", "go", 300).await;
        seed(&store, "c", "rust", 200).await;
        for (id, submission_id) in [("x", "a"), ("y", "a"), ("z", "c")] {
            let comment = json!({ "id": id, "message": "hi", "submission_id": submission_id, "createdAt": 1 });
            store
                .put(Table::Comments, comment.as_object().cloned().unwrap(), WriteCondition::KeyAbsent)
                .await
                .unwrap();
        }

        let submissions = service(store);
        let front: Vec<_> = submissions
            .front_page()
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.submission.id, s.comment_count))
            .collect();
        assert_eq!(
            front,
            vec![("b".to_string(), 0), ("c".to_string(), 1), ("a".to_string(), 2)]
        );

        let rust: Vec<_> = submissions
            .in_community("rust")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.submission.id)
            .collect();
        assert_eq!(rust, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn delete_keeps_comments_unless_cascading() {
        let store = Arc::new(MemoryStore::new());
        for cascade in [false, true] {
            let submissions = SubmissionService::new(store.clone(), cascade);
            let created = submissions
                .create(input("Hello there", "http://x.com", "devs"))
                .await
                .unwrap();
            let comment = json!({ "id": format!("c-{cascade}"), "message": "hi", "submission_id": created.id.clone(), "createdAt": 1 });
            store
                .put(Table::Comments, comment.as_object().cloned().unwrap(), WriteCondition::KeyAbsent)
                .await
                .unwrap();

            submissions.delete(&created.id).await.unwrap();
            assert!(matches!(
                submissions.get(&created.id).await,
                Err(DomainError::NotFound { .. })
            ));
            let orphan = store.get(Table::Comments, &format!("c-{cascade}")).await.unwrap();
            assert_eq!(orphan.is_some(), !cascade);
        }
    }

    #[tokio::test]
    async fn deleting_twice_is_fine() {
        let submissions = service(Arc::new(MemoryStore::new()));
        submissions.delete("ghost").await.unwrap();
        submissions.delete("ghost").await.unwrap();
    }
}
