//! Authentication ports: bearer tokens and password digests.

use crate::domain::User;

/// Identity carried inside a signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: i32,
    pub name: Option<String>,
    pub email: String,
    pub issued_at: i64,
    /// `None` when tokens are issued without expiry.
    pub expires_at: Option<i64>,
}

/// Token service trait for issuing and checking bearer tokens.
pub trait TokenService: Send + Sync {
    /// Sign a token for a user.
    fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// Validate and decode a token, reporting why it was rejected.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Fail-closed verification: any rejection is "no claims".
    fn verify(&self, token: &str) -> Option<TokenClaims> {
        match self.validate_token(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(reason = %e, "Token rejected");
                None
            }
        }
    }
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
