//! Key-value store collaborator and the typed project view over it.
//!
//! Projects live under `project:{id}` as JSON documents and every id is a
//! member of the `projects` set. The store offers no transactions; a
//! concurrent writer touching the same key wins by last write.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::project::Project;

/// Set holding every project id.
pub const PROJECTS_SET_KEY: &str = "projects";

/// Key of a single project record.
pub fn project_key(id: &str) -> String {
    format!("project:{id}")
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing service failed (connection, query, ...).
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A stored document could not be read as the expected record.
    #[error("Malformed record at '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be turned into a JSON document.
    #[error("Could not encode record for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// KeyValueStore
// ---------------------------------------------------------------------------

/// Minimal get / set / set-membership interface of the backing store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// All members of the set at `set_key`. Empty if the set does not exist.
    async fn members(&self, set_key: &str) -> Result<Vec<String>, StoreError>;

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or replace the document at `key`.
    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Add `member` to the set at `set_key`. Adding twice is a no-op.
    async fn add_member(&self, set_key: &str, member: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// ProjectStore
// ---------------------------------------------------------------------------

/// Typed access to project records.
#[derive(Clone)]
pub struct ProjectStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProjectStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        self.kv.members(PROJECTS_SET_KEY).await
    }

    /// Load a project. `Ok(None)` when no record exists under the id.
    pub async fn load(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let key = project_key(id);
        match self.kv.get(&key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Decode { key, source }),
            None => Ok(None),
        }
    }

    /// Persist the full project record.
    pub async fn save(&self, project: &Project) -> Result<(), StoreError> {
        let key = project_key(&project.id);
        let value = serde_json::to_value(project).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        self.kv.set(&key, &value).await
    }
}
