//! # SQLite Implementation
//!
//! Maps each logical table onto a two-column SQLite table: the primary key and
//! the JSON-encoded document. Filters are still evaluated client-side, exactly
//! as the in-memory store does.

use async_trait::async_trait;
use domains::ports::{Document, DocumentStore, Filter, StoreError, Table, WriteCondition};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub struct SqliteStore {
    pool: SqlitePool,
}

fn backend(err: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn decode(raw: &str) -> Result<Document, StoreError> {
    serde_json::from_str(raw).map_err(backend)
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and ensures every table exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(backend)?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
        if url.contains(":memory:") {
            // An in-memory database lives exactly as long as its single connection.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options.connect_with(options).await.map_err(backend)?;
        let store = Self { pool };
        store.create_tables().await?;
        Ok(store)
    }

    async fn create_tables(&self) -> Result<(), StoreError> {
        for table in Table::ALL {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS {} (key TEXT PRIMARY KEY NOT NULL, document TEXT NOT NULL)",
                table.name()
            );
            sqlx::query(&ddl).execute(&self.pool).await.map_err(backend)?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, table: Table, key: &str) -> Result<Option<Document>, StoreError> {
        let sql = format!("SELECT document FROM {} WHERE key = ?", table.name());
        let raw: Option<String> = sqlx::query_scalar(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        raw.as_deref().map(decode).transpose()
    }

    /// `KeyAbsent` relies on the PRIMARY KEY constraint: the insert either
    /// lands or fails with a unique violation, atomically.
    async fn put(
        &self,
        table: Table,
        document: Document,
        condition: WriteCondition,
    ) -> Result<(), StoreError> {
        let key = table.key_of(&document)?;
        let encoded = serde_json::to_string(&document).map_err(backend)?;
        let verb = match condition {
            WriteCondition::Overwrite => "INSERT OR REPLACE",
            WriteCondition::KeyAbsent => "INSERT",
        };
        let sql = format!("{verb} INTO {} (key, document) VALUES (?, ?)", table.name());

        match sqlx::query(&sql).bind(&key).bind(encoded).execute(&self.pool).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                tracing::debug!(%table, %key, "conditional insert rejected");
                Err(StoreError::AlreadyExists { table, key })
            }
            Err(err) => Err(backend(err)),
        }
    }

    async fn scan(&self, table: Table, filter: Option<Filter>) -> Result<Vec<Document>, StoreError> {
        let sql = format!("SELECT document FROM {}", table.name());
        let rows: Vec<String> = sqlx::query_scalar(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        let mut documents = Vec::with_capacity(rows.len());
        for raw in &rows {
            let document = decode(raw)?;
            if filter.as_ref().map_or(true, |f| f.matches(&document)) {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    async fn delete(&self, table: Table, key: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE key = ?", table.name());
        sqlx::query(&sql)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    /// All deletes share one transaction, so a failure leaves nothing half-removed.
    async fn batch_delete(&self, table: Table, keys: Vec<String>) -> Result<(), StoreError> {
        if keys.is_empty() {
            return Ok(());
        }

        let sql = format!("DELETE FROM {} WHERE key = ?", table.name());
        let mut tx = self.pool.begin().await.map_err(backend)?;
        for key in &keys {
            sqlx::query(&sql)
                .bind(key)
                .execute(&mut *tx)
                .await
                .map_err(backend)?;
        }
        tx.commit().await.map_err(backend)?;
        Ok(())
    }
}
