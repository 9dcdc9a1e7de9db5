//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{CommentRepository, PostRepository, TokenService, UserRepository};
use blog_core::services::{AuthService, ContentService};
use blog_infra::{InMemoryStore, JwtTokenService};

#[cfg(feature = "postgres")]
use blog_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use blog_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub content: Arc<ContentService>,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabaseConnections>,
    /// `postgres` or `memory`.
    pub storage: &'static str,
    pub graphiql_enabled: bool,
}

struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.main.clone())),
        }
    }
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    #[cfg(feature = "postgres")]
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory(config));
        };

        let db = match DatabaseConnections::init(db_config).await {
            Ok(db) => db,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Ok(Self::in_memory(config));
            }
        };

        if config.auto_migrate {
            tracing::info!("Applying pending migrations");
            Migrator::up(&db.main, None).await?;
        }

        let mut state = Self::assemble(config, Repositories::postgres(&db), "postgres");
        state.db = Some(db);
        tracing::info!(storage = state.storage, "Application state initialized");
        Ok(state)
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Running without postgres feature - using in-memory store");
        Ok(Self::in_memory(config))
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::assemble(config, Repositories::in_memory(), "memory")
    }

    fn assemble(config: &AppConfig, repos: Repositories, storage: &'static str) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords = config.password_scheme.service();

        let auth = AuthService::new(repos.users.clone(), passwords, tokens.clone());
        let content = ContentService::new(
            repos.users,
            repos.posts,
            repos.comments,
            tokens,
            config.write_policy,
        );

        Self {
            auth: Arc::new(auth),
            content: Arc::new(content),
            #[cfg(feature = "postgres")]
            db: None,
            storage,
            graphiql_enabled: config.graphiql_enabled,
        }
    }
}
