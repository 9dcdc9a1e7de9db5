//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use blog_core::services::WritePolicy;
use blog_infra::auth::DEFAULT_JWT_SECRET;
use blog_infra::{DatabaseConfig, JwtConfig, PasswordScheme};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
    pub jwt: JwtConfig,
    pub password_scheme: PasswordScheme,
    pub write_policy: WritePolicy,
    pub cors_allowed_origin: String,
    pub graphiql_enabled: bool,
    pub production: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            database: None,
            auto_migrate: false,
            jwt: JwtConfig::default(),
            password_scheme: PasswordScheme::default(),
            write_policy: WritePolicy::default(),
            cors_allowed_origin: "http://localhost:3000".to_string(),
            graphiql_enabled: true,
            production: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let database = var("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| -> anyhow::Result<DatabaseConfig> {
                let mut config = DatabaseConfig::new(url);
                if let Some(max) = parse(&var, "DB_MAX_CONNECTIONS")? {
                    config.max_connections = max;
                }
                if let Some(min) = parse(&var, "DB_MIN_CONNECTIONS")? {
                    config.min_connections = min;
                }
                Ok(config)
            })
            .transpose()?;

        let expiration_hours = match parse::<i64>(&var, "JWT_EXPIRATION_HOURS")? {
            Some(hours) if hours <= 0 => None,
            Some(hours) => Some(hours),
            None => defaults.jwt.expiration_hours,
        };
        let jwt = JwtConfig {
            secret: var("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.jwt.secret),
            expiration_hours,
            issuer: var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer),
        };

        let password_scheme = match var("PASSWORD_SCHEME") {
            Some(raw) => raw.parse::<PasswordScheme>().map_err(|e| anyhow!(e))?,
            None => defaults.password_scheme,
        };
        let write_policy = match var("WRITE_POLICY") {
            Some(raw) => raw.parse::<WritePolicy>().map_err(|e| anyhow!(e))?,
            None => defaults.write_policy,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse(&var, "PORT")?.unwrap_or(defaults.port),
            database,
            auto_migrate: flag(&var, "DB_AUTO_MIGRATE").unwrap_or(defaults.auto_migrate),
            jwt,
            password_scheme,
            write_policy,
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN")
                .unwrap_or(defaults.cors_allowed_origin),
            graphiql_enabled: flag(&var, "GRAPHIQL_ENABLED").unwrap_or(defaults.graphiql_enabled),
            production: var("RUST_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production")),
        })
    }

    /// Log settings that are insecure or surprising.
    pub fn warn_insecure(&self) {
        if self.jwt.secret == DEFAULT_JWT_SECRET {
            if self.production {
                tracing::error!("JWT_SECRET is not set; tokens are signed with the built-in default");
            } else {
                tracing::warn!("JWT_SECRET is not set; using the built-in development secret");
            }
        }
        if self.password_scheme == PasswordScheme::Sha1 {
            tracing::warn!("Passwords are stored as unsalted SHA-1 digests; set PASSWORD_SCHEME=argon2");
        }
        if self.jwt.expiration_hours.is_none() {
            tracing::warn!("Issued tokens never expire");
        }
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|raw| raw.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("invalid value for {key}"))
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    var(key).map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
