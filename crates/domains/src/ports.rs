//! # Core Traits (Ports)
//!
//! The storage contract every backend must satisfy to be used by the binary.
//! The store is schema-less: records are JSON objects, and the only attribute
//! it understands is each table's key.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A schema-less record as held by the store.
pub type Document = Map<String, Value>;

/// The three logical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Communities,
    Submissions,
    Comments,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Communities, Table::Submissions, Table::Comments];

    pub fn name(self) -> &'static str {
        match self {
            Table::Communities => "communities",
            Table::Submissions => "submissions",
            Table::Comments => "comments",
        }
    }

    /// The attribute holding the primary key.
    pub fn key_attribute(self) -> &'static str {
        match self {
            Table::Communities => "title",
            Table::Submissions | Table::Comments => "id",
        }
    }

    /// Extracts the primary key from a document bound for this table.
    pub fn key_of(self, document: &Document) -> Result<String, StoreError> {
        document
            .get(self.key_attribute())
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(StoreError::MissingKey {
                table: self,
                attribute: self.key_attribute(),
            })
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Precondition attached to a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCondition {
    /// Unconditional put; replaces any existing record.
    Overwrite,
    /// Accepted only if no record exists at the key. Must be atomic.
    KeyAbsent,
}

/// Client-side scan predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    AttributeEquals { attribute: String, value: Value },
}

impl Filter {
    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::AttributeEquals {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::AttributeEquals { attribute, value } => document.get(attribute) == Some(value),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// The conditional check of a `KeyAbsent` write failed.
    #[error("{table} record {key:?} already exists")]
    AlreadyExists { table: Table, key: String },

    #[error("{table} record has no string {attribute:?} attribute")]
    MissingKey { table: Table, attribute: &'static str },

    /// Infrastructure failure (connection lost, I/O error, malformed row)
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Data persistence contract for communities, submissions and comments.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches one record, `None` if the key is absent.
    async fn get(&self, table: Table, key: &str) -> Result<Option<Document>, StoreError>;

    /// Writes a record keyed by the table's key attribute.
    async fn put(
        &self,
        table: Table,
        document: Document,
        condition: WriteCondition,
    ) -> Result<(), StoreError>;

    /// Full-table read. Order is unspecified.
    async fn scan(&self, table: Table, filter: Option<Filter>) -> Result<Vec<Document>, StoreError>;

    /// Removes a record. Absent keys are not an error.
    async fn delete(&self, table: Table, key: &str) -> Result<(), StoreError>;

    /// Removes every listed key. Absent keys are skipped.
    async fn batch_delete(&self, table: Table, keys: Vec<String>) -> Result<(), StoreError>;
}
