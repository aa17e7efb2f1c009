//! PostgreSQL-backed implementations of the core collaborator traits.

use async_trait::async_trait;
use serde_json::Value;
use sitecraft_core::email_log::{EmailLog, EmailLogEntry, EmailLogQuery, NewEmailLogEntry};
use sitecraft_core::store::{KeyValueStore, StoreError};

use crate::repositories::{EmailLogRepo, KvRepo};
use crate::DbPool;

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

// ---------------------------------------------------------------------------
// PgKeyValueStore
// ---------------------------------------------------------------------------

/// Key-value store on the `kv_entries` / `kv_set_members` tables.
#[derive(Clone)]
pub struct PgKeyValueStore {
    pool: DbPool,
}

impl PgKeyValueStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for PgKeyValueStore {
    async fn members(&self, set_key: &str) -> Result<Vec<String>, StoreError> {
        KvRepo::members(&self.pool, set_key).await.map_err(backend)
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entry = KvRepo::find(&self.pool, key).await.map_err(backend)?;
        Ok(entry.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        KvRepo::upsert(&self.pool, key, value)
            .await
            .map(|_| ())
            .map_err(backend)
    }

    async fn add_member(&self, set_key: &str, member: &str) -> Result<(), StoreError> {
        KvRepo::add_member(&self.pool, set_key, member)
            .await
            .map(|_| ())
            .map_err(backend)
    }
}

// ---------------------------------------------------------------------------
// PgEmailLog
// ---------------------------------------------------------------------------

/// Email log on the `email_log` table.
#[derive(Clone)]
pub struct PgEmailLog {
    pool: DbPool,
}

impl PgEmailLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailLog for PgEmailLog {
    async fn log_email_sent(&self, entry: NewEmailLogEntry) -> Result<(), StoreError> {
        let row = EmailLogRepo::insert(&self.pool, &entry)
            .await
            .map_err(backend)?;
        tracing::debug!(
            id = row.id,
            project_id = %row.project_id,
            email_type = %row.email_type,
            "Email log entry written"
        );
        Ok(())
    }

    async fn list(&self, query: &EmailLogQuery) -> Result<Vec<EmailLogEntry>, StoreError> {
        let rows = EmailLogRepo::list(&self.pool, query)
            .await
            .map_err(backend)?;
        rows.into_iter()
            .map(|row| {
                EmailLogEntry::try_from(row).map_err(|e| StoreError::Backend(e.to_string()))
            })
            .collect()
    }
}
