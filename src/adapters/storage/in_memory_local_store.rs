//! In-memory local store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{LocalStore, LocalStoreError};

/// Local store that forgets everything when dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key before the store is handed out.
    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.try_write() {
            entries.insert(key.into(), value.into());
        }
        self
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LocalStore for InMemoryLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
