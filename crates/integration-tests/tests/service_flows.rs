use domains::models::{NewComment, NewCommunity, NewSubmission};
use domains::ports::{DocumentStore, MockDocumentStore, StoreError, Table};
use domains::DomainError;
use services::{ServiceOptions, Services};
use std::sync::Arc;
use storage_adapters::MemoryStore;

fn services(cascade_comments: bool) -> (Services, Arc<dyn DocumentStore>) {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    (
        Services::new(store.clone(), ServiceOptions { cascade_comments }),
        store,
    )
}

fn submission(title: &str, community: &str) -> NewSubmission {
    NewSubmission {
        title: title.into(),
        url: "https://example.com".into(),
        community: community.into(),
    }
}

fn comment(submission_id: &str, message: &str) -> NewComment {
    NewComment {
        message: message.into(),
        submission_id: submission_id.into(),
        parent_id: None,
    }
}

#[tokio::test]
async fn create_show_delete_show_is_not_found() {
    let (services, _) = services(false);
    let created = services
        .submissions
        .create(submission("Hello there", "devs"))
        .await
        .unwrap();

    let shown = services.submissions.show(&created.id).await.unwrap();
    assert_eq!(shown.submission, created);

    services.submissions.delete(&created.id).await.unwrap();
    let err = services.submissions.show(&created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "submission", .. }));
}

#[tokio::test]
async fn comments_survive_submission_delete_by_default() {
    let (services, store) = services(false);
    let post = services
        .submissions
        .create(submission("Hello there", "devs"))
        .await
        .unwrap();
    services.comments.create(comment(&post.id, "still here")).await.unwrap();

    services.submissions.delete(&post.id).await.unwrap();
    assert_eq!(store.scan(Table::Comments, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn cascade_option_removes_comments_with_their_submission() {
    let (services, store) = services(true);
    let doomed = services
        .submissions
        .create(submission("Hello there", "devs"))
        .await
        .unwrap();
    let kept = services
        .submissions
        .create(submission("Another one", "devs"))
        .await
        .unwrap();
    services.comments.create(comment(&doomed.id, "gone soon")).await.unwrap();
    services.comments.create(comment(&kept.id, "stays")).await.unwrap();

    services.submissions.delete(&doomed.id).await.unwrap();

    let remaining = store.scan(Table::Comments, None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["message"], "stays");
}

#[tokio::test]
async fn cascade_option_reaches_comments_through_community_delete() {
    let (services, store) = services(true);
    services
        .communities
        .create(NewCommunity { name: "devs".into() })
        .await
        .unwrap();
    let post = services
        .submissions
        .create(submission("Hello there", "devs"))
        .await
        .unwrap();
    services.comments.create(comment(&post.id, "one")).await.unwrap();
    services.comments.create(comment(&post.id, "two")).await.unwrap();

    let report = services.communities.delete("devs").await.unwrap();
    assert_eq!(report.submissions_removed, 1);
    assert_eq!(report.comments_removed, 2);
    assert!(store.scan(Table::Comments, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_counts_follow_the_listing() {
    let (services, _) = services(false);
    let post = services
        .submissions
        .create(submission("Hello there", "devs"))
        .await
        .unwrap();
    for message in ["a", "b", "c"] {
        services.comments.create(comment(&post.id, message)).await.unwrap();
    }

    let front = services.submissions.front_page().await.unwrap();
    assert_eq!(front.len(), 1);
    assert_eq!(front[0].comment_count, 3);
}

#[tokio::test]
async fn backend_failures_surface_as_store_errors() {
    let mut store = MockDocumentStore::new();
    store
        .expect_scan()
        .returning(|_, _| Err(StoreError::Backend("connection reset".into())));
    let services = Services::new(Arc::new(store), ServiceOptions::default());

    let err = services.submissions.front_page().await.unwrap_err();
    assert!(matches!(err, DomainError::Store(StoreError::Backend(_))));
    let err = services.communities.titles().await.unwrap_err();
    assert!(matches!(err, DomainError::Store(_)));
}

#[tokio::test]
async fn unreadable_documents_are_corrupt_records() {
    let mut store = MockDocumentStore::new();
    store.expect_get().returning(|_, _| {
        let mut document = serde_json::Map::new();
        document.insert("id".into(), serde_json::json!(42));
        Ok(Some(document))
    });
    let services = Services::new(Arc::new(store), ServiceOptions::default());

    let err = services.submissions.get("42").await.unwrap_err();
    assert!(matches!(err, DomainError::CorruptRecord { entity: "submission", .. }));
}
