//! Sign-up, sign-in and profile lookup.

use std::sync::{Arc, OnceLock};

use crate::domain::{NewUser, User, is_plausible_email, mask_email};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Hashed once per service and checked against when the email is unknown,
/// so both rejection paths pay for a digest.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Outcome of a sign-in attempt.
///
/// A rejected attempt is `{ user: None, token: None }`, never an error, and
/// does not say whether the email or the password was wrong.
#[derive(Debug, Clone, Default)]
pub struct SignIn {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl SignIn {
    pub fn rejected() -> Self {
        Self::default()
    }
}

/// Credential and identity operations over the user store.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    decoy_hash: OnceLock<Option<String>>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            decoy_hash: OnceLock::new(),
        }
    }

    pub async fn sign_up(&self, input: SignUp) -> Result<User, DomainError> {
        let email = input.email.trim().to_string();
        if !is_plausible_email(&email) {
            return Err(DomainError::Validation("a valid email is required".into()));
        }
        if input.password.is_empty() {
            return Err(DomainError::Validation("password is required".into()));
        }
        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::DuplicateEmail(email));
        }

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        // The unique index still decides races between concurrent sign-ups.
        match self
            .users
            .create(NewUser::new(name, email.clone(), password_hash))
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = user.id, email = %mask_email(&email), "User signed up");
                Ok(user)
            }
            Err(RepoError::Duplicate(_)) => Err(DomainError::DuplicateEmail(email)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, DomainError> {
        let email = email.trim();
        let Some(user) = self.users.find_by_email(email).await? else {
            self.verify_decoy(password);
            tracing::debug!(email = %mask_email(email), "Sign-in rejected");
            return Ok(SignIn::rejected());
        };

        let valid = match self.passwords.verify(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                // A digest from another scheme cannot match; treat it as a mismatch.
                tracing::warn!(user_id = user.id, error = %e, "Stored password hash unreadable");
                false
            }
        };
        if !valid {
            tracing::debug!(email = %mask_email(email), "Sign-in rejected");
            return Ok(SignIn::rejected());
        }

        let token = self
            .tokens
            .issue(&user)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = user.id, "User signed in");
        Ok(SignIn {
            user: Some(user),
            token: Some(token),
        })
    }

    fn verify_decoy(&self, password: &str) {
        let decoy = self.decoy_hash.get_or_init(|| match self.passwords.hash(DECOY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!(error = %e, "Could not hash decoy password");
                None
            }
        });
        if let Some(hash) = decoy {
            let _ = self.passwords.verify(password, hash);
        }
    }

    /// Resolve a token to the current user record.
    ///
    /// Reads the store rather than trusting the token's snapshot, so a user
    /// that no longer exists yields `None` like an invalid token does.
    pub async fn profile(&self, token: &str) -> Result<Option<User>, DomainError> {
        let Some(claims) = self.tokens.verify(token) else {
            return Ok(None);
        };
        Ok(self.users.find_by_id(claims.user_id).await?)
    }
}
