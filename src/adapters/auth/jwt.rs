//! HS256 JWT token service.
//!
//! Implements both `TokenIssuer` and `SessionValidator` with one shared
//! secret, so tokens minted at login are accepted by the auth middleware.
//!
//! # Security
//!
//! - Issuer and expiry are validated on every request
//! - `sub`, `exp` and `iss` are required claims
//! - The secret is held as `secrecy::SecretString`

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{SessionValidator, TokenIssuer};

/// Configuration for the JWT token service.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC signing secret.
    pub secret: SecretString,

    /// Value written to and required in the `iss` claim.
    pub issuer: String,

    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>, token_ttl_secs: u64) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
            issuer: issuer.into(),
            token_ttl_secs,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

/// JWT claims carried by PivotPoint access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject - the numeric user ID
    sub: String,

    /// Login name
    username: String,

    #[serde(default)]
    email: Option<String>,

    /// Issuer
    iss: String,

    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,

    /// Issued at timestamp
    iat: i64,
}

/// Issues and validates HS256 access tokens.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    token_ttl_secs: i64,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: config.issuer.clone(),
            token_ttl_secs: i64::try_from(config.token_ttl_secs).unwrap_or(i64::MAX),
        }
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::service_unavailable("token signing failed")
        })
    }

    fn claims_for(&self, user: &AuthenticatedUser, issued_at: i64) -> Claims {
        Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            exp: issued_at.saturating_add(self.token_ttl_secs),
            iat: issued_at,
        }
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenService {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        let claims = self.claims_for(user, Timestamp::now().as_unix_secs());
        self.encode_claims(&claims)
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let claims = data.claims;
        let id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Token subject is not a user id");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(id, claims.username, claims.email))
    }
}
