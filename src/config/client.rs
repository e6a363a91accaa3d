//! Client configuration
//!
//! Loaded separately from the server settings, under the
//! `PIVOT_POINT_CLIENT` prefix (`PIVOT_POINT_CLIENT__API_URL`).

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{ConfigError, ValidationError};
use crate::adapters::api_client::ApiClientConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL including the `/api` prefix
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// YAML file holding the token, the cached user and the theme flag
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PIVOT_POINT_CLIENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn api_client_config(&self) -> ApiClientConfig {
        ApiClientConfig::new(self.api_url.clone()).with_timeout(self.timeout())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORE_PATH"));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            store_path: default_store_path(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:5001/api".to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".pivot-point/store.yaml")
}

fn default_timeout() -> u64 {
    30
}
