use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use blog_core::services::ContentService;

use super::error::gql;
use super::types::{PostObject, PostsPayload};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// A single post with its author and comments.
    async fn get_post(&self, ctx: &Context<'_>, id: i32) -> Result<PostObject> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let post = content.get_post(id).await.map_err(gql)?;
        Ok(PostObject(post))
    }

    /// Every post, newest first.
    async fn get_posts(&self, ctx: &Context<'_>) -> Result<PostsPayload> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let posts = content.list_posts().await.map_err(gql)?;
        Ok(PostsPayload {
            posts: posts.into_iter().map(PostObject).collect(),
        })
    }
}
