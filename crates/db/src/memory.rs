//! In-process collaborators backed by `tokio::sync::RwLock`.
//!
//! Used by the API integration tests. Nothing here is persisted.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sitecraft_core::email_log::{EmailLog, EmailLogEntry, EmailLogQuery, NewEmailLogEntry};
use sitecraft_core::store::{KeyValueStore, StoreError};
use tokio::sync::RwLock;

// ---------------------------------------------------------------------------
// MemoryKeyValueStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryKeyValueStore {
    documents: RwLock<HashMap<String, Value>>,
    sets: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw document under `key`, for assertions.
    pub async fn document(&self, key: &str) -> Option<Value> {
        self.documents.read().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn members(&self, set_key: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .sets
            .read()
            .await
            .get(set_key)
            .cloned()
            .unwrap_or_default())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn add_member(&self, set_key: &str, member: &str) -> Result<(), StoreError> {
        let mut sets = self.sets.write().await;
        let members = sets.entry(set_key.to_string()).or_default();
        if !members.iter().any(|m| m == member) {
            members.push(member.to_string());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryEmailLog
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryEmailLog {
    entries: RwLock<Vec<EmailLogEntry>>,
}

impl MemoryEmailLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry in insertion order.
    pub async fn entries(&self) -> Vec<EmailLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl EmailLog for MemoryEmailLog {
    async fn log_email_sent(&self, entry: NewEmailLogEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let id = entries.len() as i64 + 1;
        entries.push(EmailLogEntry {
            id,
            project_id: entry.project_id,
            customer_name: entry.customer_name,
            recipient: entry.recipient,
            email_type: entry.email_type,
            subject: entry.subject,
            details: entry.details,
            success: entry.success,
            sent_at: Utc::now(),
        });
        Ok(())
    }

    async fn list(&self, query: &EmailLogQuery) -> Result<Vec<EmailLogEntry>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| {
                query
                    .project_id
                    .as_deref()
                    .map_or(true, |id| e.project_id == id)
            })
            .skip(query.clamped_offset() as usize)
            .take(query.clamped_limit() as usize)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
