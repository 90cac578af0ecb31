use async_trait::async_trait;
use libsql::{Builder, Connection, Database};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Stored upload time {0} is out of range")]
    OutOfRange(i64),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage handed to the quota tracker.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Persistent store backed by a local libSQL file.
pub struct LibsqlStore {
    _db: Database,
    conn: Connection,
}

impl LibsqlStore {
    pub async fn new(db_path: &str) -> Result<Self, StorageError> {
        let db = Builder::new_local(db_path).build().await?;
        let conn = db.connect()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
            (),
        )
        .await?;

        info!("Quota store initialized: {}", db_path);
        Ok(Self { _db: db, conn })
    }
}

#[async_trait]
impl KeyValueStore for LibsqlStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut rows = self
            .conn
            .query("SELECT value FROM kv_store WHERE key = ?", [key])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                (key, value, chrono::Utc::now().to_rfc3339()),
            )
            .await?;
        debug!("Stored value for key: {}", key);
        Ok(())
    }
}

/// Process-local store, used when the database cannot be opened and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("Mutex lock failed: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("Mutex lock failed: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_libsql_store_upserts() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("quota.db");
        let store = LibsqlStore::new(&db_path.to_string_lossy()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_libsql_store_rejects_invalid_path() {
        let result = LibsqlStore::new("/invalid/path/to/quota.db").await;
        assert!(result.is_err());
    }
}
