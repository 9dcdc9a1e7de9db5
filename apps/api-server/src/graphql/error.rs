//! Domain errors as GraphQL errors with an `extensions.code`.

use async_graphql::ErrorExtensions;
use blog_core::DomainError;

/// Wrapper so domain errors can carry GraphQL extensions.
pub struct GraphqlError(pub DomainError);

impl ErrorExtensions for GraphqlError {
    fn extend(&self) -> async_graphql::Error {
        let message = match &self.0 {
            DomainError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let code = self.0.code();

        async_graphql::Error::new(message).extend_with(|_, ext| ext.set("code", code))
    }
}

/// Map a domain error for `map_err`.
pub fn gql(err: DomainError) -> async_graphql::Error {
    GraphqlError(err).extend()
}
