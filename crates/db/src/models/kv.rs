//! Key-value document row.

use sqlx::FromRow;
use sitecraft_core::types::Timestamp;

/// A row from the `kv_entries` table.
#[derive(Debug, Clone, FromRow)]
pub struct KvEntry {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
