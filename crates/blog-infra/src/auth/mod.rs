//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{DEFAULT_JWT_SECRET, JwtConfig, JwtTokenService};
pub use password::{Argon2PasswordService, PasswordScheme, Sha1DigestService};
