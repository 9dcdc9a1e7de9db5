//! Batched author lookup.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use blog_core::domain::User;
use blog_core::services::ContentService;

use super::error::gql;

/// DataLoader for fetching users by id.
pub struct UserLoader {
    content: Arc<ContentService>,
}

impl UserLoader {
    pub fn new(content: Arc<ContentService>) -> Self {
        Self { content }
    }
}

impl Loader<i32> for UserLoader {
    type Value = User;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        tracing::debug!(count = keys.len(), "Loading authors");
        let users = self.content.authors(keys).await.map_err(gql)?;
        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}
