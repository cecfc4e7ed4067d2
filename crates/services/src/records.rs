//! Conversions between typed models and store documents, plus the
//! id/clock helpers every create path uses.

use chrono::Utc;
use domains::errors::{DomainError, Result};
use domains::models::{Comment, Submission};
use domains::ports::{Document, DocumentStore, Filter, StoreError, Table, WriteCondition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Time-ordered unique id for new submissions and comments.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Creation timestamp in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn to_document<T: Serialize>(entity: &'static str, value: &T) -> Result<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(DomainError::CorruptRecord {
            entity,
            reason: format!("expected an object, got {other}"),
        }),
        Err(err) => Err(DomainError::CorruptRecord {
            entity,
            reason: err.to_string(),
        }),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(entity: &'static str, document: Document) -> Result<T> {
    serde_json::from_value(Value::Object(document)).map_err(|err| DomainError::CorruptRecord {
        entity,
        reason: err.to_string(),
    })
}

pub(crate) fn from_documents<T: DeserializeOwned>(
    entity: &'static str,
    documents: Vec<Document>,
) -> Result<Vec<T>> {
    documents
        .into_iter()
        .map(|document| from_document(entity, document))
        .collect()
}

/// Conditional insert that reports a lost race as `Duplicate`.
pub(crate) async fn insert_new(
    store: &dyn DocumentStore,
    table: Table,
    entity: &'static str,
    document: Document,
) -> Result<()> {
    match store.put(table, document, WriteCondition::KeyAbsent).await {
        Ok(()) => Ok(()),
        Err(StoreError::AlreadyExists { key, .. }) => Err(DomainError::Duplicate { entity, key }),
        Err(err) => Err(err.into()),
    }
}

/// Newest first; equal timestamps fall back to id so the order never flips
/// between requests.
pub fn sort_newest_first(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

pub(crate) fn sort_oldest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

/// Deletes every comment attached to one of `submission_ids`. Returns how many went.
pub(crate) async fn purge_comments(store: &dyn DocumentStore, submission_ids: &[String]) -> Result<usize> {
    if submission_ids.is_empty() {
        return Ok(0);
    }

    let filter = match submission_ids {
        [only] => Some(Filter::eq("submission_id", only.as_str())),
        _ => None,
    };
    let comments: Vec<Comment> = from_documents("comment", store.scan(Table::Comments, filter).await?)?;
    let doomed: Vec<String> = comments
        .into_iter()
        .filter(|c| submission_ids.contains(&c.submission_id))
        .map(|c| c.id)
        .collect();

    let count = doomed.len();
    store.batch_delete(Table::Comments, doomed).await?;
    Ok(count)
}
