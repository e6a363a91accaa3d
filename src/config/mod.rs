//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Server settings use the `PIVOT_POINT`
//! prefix, nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use pivot_point::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod client;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` if present, then every `PIVOT_POINT__*` variable:
    ///
    /// - `PIVOT_POINT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PIVOT_POINT__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PIVOT_POINT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks. Production additionally requires a database URL
    /// and a JWT secret of at least [`MIN_PRODUCTION_SECRET_LEN`] bytes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = self.server.environment;
        self.server.validate()?;
        self.database.validate(environment)?;
        self.auth.validate(environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PIVOT_POINT__DATABASE__URL",
        "PIVOT_POINT__AUTH__JWT_SECRET",
        "PIVOT_POINT__AUTH__TOKEN_TTL_SECS",
        "PIVOT_POINT__SERVER__PORT",
        "PIVOT_POINT__SERVER__ENVIRONMENT",
        "PIVOT_POINT_CLIENT__API_URL",
        "PIVOT_POINT_CLIENT__TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn set_production_env() {
        env::set_var("PIVOT_POINT__SERVER__ENVIRONMENT", "production");
        env::set_var("PIVOT_POINT__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var(
            "PIVOT_POINT__AUTH__JWT_SECRET",
            "0123456789abcdef0123456789abcdef",
        );
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 5001);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(!config.database.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_production_env();
        env::set_var("PIVOT_POINT__SERVER__PORT", "3000");
        env::set_var("PIVOT_POINT__AUTH__TOKEN_TTL_SECS", "60");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.auth.token_ttl_secs, 60);
        assert_eq!(
            config.auth.jwt_secret.expose_secret(),
            "0123456789abcdef0123456789abcdef"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_requires_database() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_production_env();
        env::remove_var("PIVOT_POINT__DATABASE__URL");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::MissingRequired("DATABASE_URL"))
        );
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_production_env();
        env::set_var("PIVOT_POINT__AUTH__JWT_SECRET", "short");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::JwtSecretTooShort(32))
        );
    }

    #[test]
    fn test_invalid_port_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PIVOT_POINT__SERVER__PORT", "not-a-port");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_client_config_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PIVOT_POINT_CLIENT__API_URL", "https://pivot.example.com/api");
        env::set_var("PIVOT_POINT_CLIENT__TIMEOUT_SECS", "10");
        let result = ClientConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api_url, "https://pivot.example.com/api");
        assert_eq!(config.timeout_secs, 10);
    }
}
