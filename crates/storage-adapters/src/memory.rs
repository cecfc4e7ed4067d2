//! In-process implementation of `DocumentStore`.
//! One `DashMap` per table. Nothing survives a restart.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domains::ports::{Document, DocumentStore, Filter, StoreError, Table, WriteCondition};

#[derive(Debug, Default)]
pub struct MemoryStore {
    communities: DashMap<String, Document>,
    submissions: DashMap<String, Document>,
    comments: DashMap<String, Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, table: Table) -> &DashMap<String, Document> {
        match table {
            Table::Communities => &self.communities,
            Table::Submissions => &self.submissions,
            Table::Comments => &self.comments,
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, table: Table, key: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.table(table).get(key).map(|entry| entry.value().clone()))
    }

    /// The entry API holds the shard write lock between the existence check
    /// and the insert, so racing `KeyAbsent` writers cannot both succeed.
    async fn put(
        &self,
        table: Table,
        document: Document,
        condition: WriteCondition,
    ) -> Result<(), StoreError> {
        let key = table.key_of(&document)?;
        let map = self.table(table);

        match condition {
            WriteCondition::Overwrite => {
                map.insert(key, document);
                Ok(())
            }
            WriteCondition::KeyAbsent => match map.entry(key) {
                Entry::Occupied(existing) => {
                    tracing::debug!(%table, key = %existing.key(), "conditional insert rejected");
                    Err(StoreError::AlreadyExists {
                        table,
                        key: existing.key().clone(),
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(document);
                    Ok(())
                }
            },
        }
    }

    async fn scan(&self, table: Table, filter: Option<Filter>) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .table(table)
            .iter()
            .filter(|entry| filter.as_ref().map_or(true, |f| f.matches(entry.value())))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete(&self, table: Table, key: &str) -> Result<(), StoreError> {
        self.table(table).remove(key);
        Ok(())
    }

    async fn batch_delete(&self, table: Table, keys: Vec<String>) -> Result<(), StoreError> {
        let map = self.table(table);
        for key in &keys {
            map.remove(key);
        }
        Ok(())
    }
}
