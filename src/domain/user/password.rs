//! PBKDF2-HMAC-SHA256 password hashes.
//!
//! Stored form: `v1$<iterations>$<salt hex>$<hash hex>`.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

use crate::domain::foundation::ValidationError;

/// Format version prefix.
const VERSION: &str = "v1";

/// Rounds used for newly created hashes.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// A password hash ready for storage. Never holds the plain password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    iterations: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl PasswordHash {
    /// Hashes a password with a fresh random salt.
    pub fn create(password: &str) -> Self {
        Self::create_with_iterations(password, DEFAULT_ITERATIONS)
    }

    /// Hashes with an explicit round count. Zero is treated as one.
    pub fn create_with_iterations(password: &str, iterations: u32) -> Self {
        let iterations = iterations.max(1);
        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let hash = derive(password, &salt, iterations);
        Self {
            iterations,
            salt,
            hash,
        }
    }

    /// Parses the stored form.
    pub fn parse(stored: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::invalid_format("password_hash", reason);

        let mut parts = stored.split('$');
        match parts.next() {
            Some(VERSION) => {}
            _ => return Err(invalid("unknown hash version")),
        }
        let iterations: u32 = parts
            .next()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| invalid("bad iteration count"))?;
        let salt = parts
            .next()
            .and_then(|s| hex::decode(s).ok())
            .ok_or_else(|| invalid("bad salt"))?;
        let hash = parts
            .next()
            .and_then(|s| hex::decode(s).ok())
            .filter(|h| h.len() == HASH_LEN)
            .ok_or_else(|| invalid("bad hash"))?;
        if parts.next().is_some() {
            return Err(invalid("trailing segments"));
        }

        Ok(Self {
            iterations,
            salt,
            hash,
        })
    }

    /// Constant-time check of a candidate password.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = derive(password, &self.salt, self.iterations);
        candidate.ct_eq(&self.hash).into()
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Stored form.
    pub fn to_stored(&self) -> String {
        format!(
            "{}${}${}${}",
            VERSION,
            self.iterations,
            hex::encode(&self.salt),
            hex::encode(&self.hash)
        )
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_stored())
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    pbkdf2::pbkdf2_hmac_array::<Sha256, HASH_LEN>(password.as_bytes(), salt, iterations).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7914 section 11 and the widely published PBKDF2-HMAC-SHA256 vectors.
    #[test]
    fn derive_matches_known_vectors() {
        assert_eq!(
            hex::encode(derive("passwd", b"salt", 1)),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
        assert_eq!(
            hex::encode(derive("password", b"salt", 1)),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
        assert_eq!(
            hex::encode(derive("password", b"salt", 2)),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
        assert_eq!(
            hex::encode(derive("password", b"salt", 4096)),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn salt_is_sixteen_random_bytes() {
        let stored = PasswordHash::create_with_iterations("hunter22", 1).to_stored();
        let salt_hex = stored.split('$').nth(2).unwrap();
        assert_eq!(salt_hex.len(), SALT_LEN * 2);
    }

    #[test]
    fn verify_accepts_original_password() {
        let hash = PasswordHash::create_with_iterations("correct horse", 50);
        assert!(hash.verify("correct horse"));
        assert!(!hash.verify("correct horse "));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = PasswordHash::create_with_iterations("hunter22", 10);
        let b = PasswordHash::create_with_iterations("hunter22", 10);
        assert_ne!(a.to_stored(), b.to_stored());
    }

    #[test]
    fn stored_form_parses_back() {
        let hash = PasswordHash::create_with_iterations("s3cret-pass", 25);
        let stored = hash.to_stored();
        assert!(stored.starts_with("v1$25$"));

        let parsed = PasswordHash::parse(&stored).unwrap();
        assert_eq!(parsed, hash);
        assert!(parsed.verify("s3cret-pass"));
    }

    #[test]
    fn stored_form_never_contains_password() {
        let hash = PasswordHash::create_with_iterations("plaintext-pw", 5);
        assert!(!hash.to_stored().contains("plaintext-pw"));
        assert!(!format!("{:?}", hash).contains("plaintext-pw"));
    }

    #[test]
    fn malformed_stored_forms_are_rejected() {
        assert!(PasswordHash::parse("").is_err());
        assert!(PasswordHash::parse("v2$10$00$00").is_err());
        assert!(PasswordHash::parse("v1$0$00$00").is_err());
        assert!(PasswordHash::parse("v1$10$zz$00").is_err());
        assert!(PasswordHash::parse("v1$10$00$abcd").is_err());
    }
}
