//! File-backed local store.
//!
//! Keeps every key in a single YAML map on disk. Writes go to a sibling
//! temp file first and are renamed into place.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{LocalStore, LocalStoreError};

type Entries = BTreeMap<String, String>;

/// YAML file store for client-side state.
#[derive(Debug)]
pub struct FileLocalStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileLocalStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, LocalStoreError> {
        let yaml = match fs::read_to_string(&self.path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(LocalStoreError::Io(e.to_string())),
        };

        if yaml.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_yaml::from_str(&yaml).map_err(|e| LocalStoreError::Corrupt(e.to_string()))
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), LocalStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| LocalStoreError::Io(e.to_string()))?;
            }
        }

        let yaml =
            serde_yaml::to_string(entries).map_err(|e| LocalStoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| LocalStoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| LocalStoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl LocalStore for FileLocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}
