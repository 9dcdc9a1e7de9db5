//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use blog_core::domain::User;
use blog_core::ports::{AuthError, TokenClaims, TokenService};

/// Secret used when none is configured.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// `None` issues tokens that never expire.
    pub expiration_hours: Option<i64>,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_JWT_SECRET.to_string(),
            expiration_hours: Some(24),
            issuer: "blog-api".to_string(),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    name: Option<String>,
    email: String,
    iat: i64,
    iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// HS256 token service with a shared secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        if config.expiration_hours.is_none() {
            validation.set_required_spec_claims(&["iss"]);
            validation.validate_exp = false;
        }

        Self {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = self
            .config
            .expiration_hours
            .map(|hours| (now + TimeDelta::hours(hours)).timestamp());

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            },
        )?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            name: token_data.claims.name,
            email: token_data.claims.email,
            issued_at: token_data.claims.iat,
            expires_at: token_data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: Some(1),
            issuer: "test-issuer".to_string(),
        }
    }

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: 7,
            name: Some("alice".to_string()),
            email: "alice@example.com".to_string(),
            password_hash: "digest".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let service = JwtTokenService::new(test_config());

        let token = service.issue(&test_user()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.name.as_deref(), Some("alice"));
        assert_eq!(claims.email, "alice@example.com");
        assert!(claims.expires_at.is_some());
    }

    #[test]
    fn test_token_never_carries_password_hash() {
        let service = JwtTokenService::new(test_config());
        let token = service.issue(&test_user()).unwrap();

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.set_issuer(&["test-issuer"]);
        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b""), &validation)
            .unwrap();

        assert!(raw.claims.get("password_hash").is_none());
        assert!(raw.claims.get("password").is_none());
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("invalid-token");

        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
        assert!(service.verify("invalid-token").is_none());
    }

    #[test]
    fn test_tampered_token_verifies_to_none() {
        let service = JwtTokenService::new(test_config());
        let token = service.issue(&test_user()).unwrap();

        // Flip the first character of the signature segment.
        let sig_start = token.rfind('.').unwrap() + 1;
        let first = token[sig_start..].chars().next().unwrap();
        let replacement = if first == 'A' { "B" } else { "A" };
        let mut tampered = token.clone();
        tampered.replace_range(sig_start..sig_start + 1, replacement);

        assert!(service.verify(&token).is_some());
        assert!(service.verify(&tampered).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtTokenService::new(test_config());
        let other = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        });

        let token = issuer.issue(&test_user()).unwrap();
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let service1 = JwtTokenService::new(JwtConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let service2 = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = service1.issue(&test_user()).unwrap();

        assert!(service2.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_hours: Some(-2),
            ..test_config()
        });

        let token = service.issue(&test_user()).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn test_non_expiring_tokens() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_hours: None,
            ..test_config()
        });

        let token = service.issue(&test_user()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.expires_at, None);
    }
}
