//! Credential hashing with Argon2id.
//!
//! Used after evaluation to produce a storable PHC string; evaluation itself
//! never looks at hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::HashingError;

/// Hashes and verifies passwords with Argon2id and a random salt per hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashingService;

impl HashingService {
    pub fn new() -> Self {
        Self
    }

    /// Returns the PHC string (`$argon2id$v=19$...`) for `password`.
    pub fn hash(&self, password: &SecretString) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|e| {
                #[cfg(feature = "tracing")]
                tracing::error!("Argon2 hashing failed: {}", e);
                HashingError::Hash(e.to_string())
            })?;
        Ok(hash.to_string())
    }

    /// Checks `password` against a PHC string produced by [`hash`](Self::hash).
    ///
    /// A well-formed hash that does not match yields `Ok(false)`.
    pub fn verify(&self, password: &SecretString, hash: &str) -> Result<bool, HashingError> {
        let parsed = PasswordHash::new(hash).map_err(|e| HashingError::Verify(e.to_string()))?;
        match Argon2::default().verify_password(password.expose_secret().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashingError::Verify(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(password: &str) -> SecretString {
        SecretString::new(password.to_string().into())
    }

    #[test]
    fn test_hash_is_argon2id_phc() {
        let service = HashingService::new();
        let hash = service.hash(&secret("Pass@123")).expect("hashes");
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("Pass@123"));
    }

    #[test]
    fn test_hash_uses_random_salt() {
        let service = HashingService::new();
        let first = service.hash(&secret("Pass@123")).expect("hashes");
        let second = service.hash(&secret("Pass@123")).expect("hashes");
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify() {
        let service = HashingService::new();
        let hash = service.hash(&secret("Shrut@298")).expect("hashes");
        assert_eq!(service.verify(&secret("Shrut@298"), &hash), Ok(true));
        assert_eq!(service.verify(&secret("Shrut@299"), &hash), Ok(false));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let service = HashingService::new();
        assert!(matches!(
            service.verify(&secret("Pass@123"), "not a hash"),
            Err(HashingError::Verify(_))
        ));
    }
}
