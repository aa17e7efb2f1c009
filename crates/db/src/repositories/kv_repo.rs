//! Repository for the `kv_entries` and `kv_set_members` tables.

use sqlx::PgPool;

use crate::models::kv::KvEntry;

/// Column list for `kv_entries` queries.
const COLUMNS: &str = "key, value, created_at, updated_at";

/// Provides document and set-membership operations on the key-value tables.
pub struct KvRepo;

impl KvRepo {
    /// Find the document stored under `key`.
    pub async fn find(pool: &PgPool, key: &str) -> Result<Option<KvEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kv_entries WHERE key = $1");
        sqlx::query_as::<_, KvEntry>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the document stored under `key`.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<KvEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO kv_entries (key, value) \
             VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, KvEntry>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Members of a set in insertion order.
    pub async fn members(pool: &PgPool, set_key: &str) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT member FROM kv_set_members \
             WHERE set_key = $1 \
             ORDER BY created_at ASC, member ASC",
        )
        .bind(set_key)
        .fetch_all(pool)
        .await
    }

    /// Add a member to a set. Returns `false` if it was already present.
    pub async fn add_member(
        pool: &PgPool,
        set_key: &str,
        member: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO kv_set_members (set_key, member) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT pk_kv_set_members DO NOTHING",
        )
        .bind(set_key)
        .bind(member)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
