//! Local key-value storage port.
//!
//! Holds the client's session token, cached user profile and theme
//! preference across restarts. Values are plain strings.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a local store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalStoreError {
    #[error("Local store I/O error: {0}")]
    Io(String),

    #[error("Local store is corrupt: {0}")]
    Corrupt(String),
}

/// Persistent string map scoped to one client installation.
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), LocalStoreError>;
}
