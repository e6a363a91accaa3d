//! Token signing configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::JwtConfig;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

const DEVELOPMENT_SECRET: &str = "pivot-point-dev-secret";

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: SecretString,

    /// Lifetime of issued tokens in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl AuthConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            issuer: self.issuer.clone(),
            token_ttl_secs: self.token_ttl_secs,
        }
    }

    /// The built-in development secret is shorter than the production
    /// minimum, so production always needs an explicit one.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_ISSUER"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl(),
            issuer: default_issuer(),
        }
    }
}

fn default_jwt_secret() -> SecretString {
    SecretString::new(DEVELOPMENT_SECRET.to_string())
}

fn default_token_ttl() -> u64 {
    24 * 60 * 60
}

fn default_issuer() -> String {
    "pivot-point".to_string()
}
