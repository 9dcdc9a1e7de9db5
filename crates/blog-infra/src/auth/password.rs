//! Password digest implementations.

use std::str::FromStr;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sha1::{Digest, Sha1};

use blog_core::ports::{AuthError, PasswordService, digests_match};

/// Which digest new passwords are stored with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Unsalted hex SHA-1, compatible with existing account data.
    #[default]
    Sha1,
    /// Salted Argon2id PHC strings.
    Argon2,
}

impl PasswordScheme {
    /// Build the service that stores and checks digests with this scheme.
    pub fn service(self) -> Arc<dyn PasswordService> {
        match self {
            Self::Sha1 => Arc::new(Sha1DigestService::new()),
            Self::Argon2 => Arc::new(Argon2PasswordService::new()),
        }
    }
}

impl FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "argon2" | "argon2id" => Ok(Self::Argon2),
            other => Err(format!("unknown password scheme '{other}'")),
        }
    }
}

/// Unsalted SHA-1 digest service.
///
/// Identical passwords produce identical digests and SHA-1 is fast to brute
/// force. Kept so existing accounts can still sign in; prefer
/// [`Argon2PasswordService`] for new deployments.
#[derive(Debug, Default)]
pub struct Sha1DigestService;

impl Sha1DigestService {
    pub fn new() -> Self {
        Self
    }

    pub fn digest(password: &str) -> String {
        hex::encode(Sha1::digest(password.as_bytes()))
    }
}

impl PasswordService for Sha1DigestService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(Self::digest(password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(digests_match(hash, &Self::digest(password)))
    }
}

/// Argon2-based password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_digest() {
        let service = Sha1DigestService::new();
        assert_eq!(
            service.hash("pw123").unwrap(),
            hex::encode(Sha1::digest(b"pw123"))
        );
        assert_eq!(
            Sha1DigestService::digest("password"),
            "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8"
        );
    }

    #[test]
    fn test_sha1_verify() {
        let service = Sha1DigestService::new();
        let hash = service.hash("pw123").unwrap();

        assert!(service.verify("pw123", &hash).unwrap());
        assert!(!service.verify("pw124", &hash).unwrap());
    }

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "secure_password_123";

        let hash = service.hash(password).unwrap();
        assert!(service.verify(password, &hash).unwrap());
        assert!(!service.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_argon2_rejects_sha1_digest() {
        let service = Argon2PasswordService::new();
        let legacy = Sha1DigestService::digest("pw123");

        assert!(service.verify("pw123", &legacy).is_err());
    }

    #[test]
    fn test_parse_scheme() {
        assert_eq!("SHA1".parse::<PasswordScheme>(), Ok(PasswordScheme::Sha1));
        assert_eq!("argon2".parse::<PasswordScheme>(), Ok(PasswordScheme::Argon2));
        assert!("md5".parse::<PasswordScheme>().is_err());
    }
}
