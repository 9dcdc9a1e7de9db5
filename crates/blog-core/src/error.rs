//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures surfaced to API callers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("A valid token is required for this operation")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i32) -> Self {
        Self::NotFound { entity_type, id }
    }

    /// Stable machine-readable code for the API boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "BAD_USER_INPUT",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::Constraint(_) => "CONSTRAINT_VIOLATION",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Unique constraint violation: {0}")]
    Duplicate(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            // Services attach entity context to NotFound before converting.
            RepoError::NotFound => DomainError::Internal("unexpected missing record".into()),
            RepoError::Duplicate(msg) | RepoError::Constraint(msg) => DomainError::Constraint(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
