//! GraphQL object, payload and input types.

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, InputObject, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};

use blog_core::domain::{Comment, Post, User};
use blog_core::services::ContentService;

use super::error::gql;
use super::loader::UserLoader;

async fn load_author(ctx: &Context<'_>, author_id: i32) -> Result<Option<UserObject>> {
    let loader = ctx.data_unchecked::<DataLoader<UserLoader>>();
    Ok(loader.load_one(author_id).await?.map(UserObject))
}

/// An account. The stored password digest is not part of the schema.
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    /// Posts written by this user, newest first.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let posts = content.posts_by_author(self.0.id).await.map_err(gql)?;
        Ok(posts.into_iter().map(PostObject).collect())
    }
}

pub struct PostObject(pub Post);

#[Object(name = "Post")]
impl PostObject {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author_id(&self) -> i32 {
        self.0.author_id
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        load_author(ctx, self.0.author_id).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentObject>> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let comments = content.comments_for_post(self.0.id).await.map_err(gql)?;
        Ok(comments.into_iter().map(CommentObject).collect())
    }
}

pub struct CommentObject(pub Comment);

#[Object(name = "Comment")]
impl CommentObject {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn author_id(&self) -> i32 {
        self.0.author_id
    }

    async fn post_id(&self) -> i32 {
        self.0.post_id
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }

    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        load_author(ctx, self.0.author_id).await
    }

    async fn post(&self, ctx: &Context<'_>) -> Result<PostObject> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let post = content.get_post(self.0.post_id).await.map_err(gql)?;
        Ok(PostObject(post))
    }
}

/// Result of `signinUser`. Both fields are null when the credentials are rejected.
#[derive(SimpleObject, Default)]
pub struct AuthPayload {
    pub token: Option<String>,
    pub user: Option<UserObject>,
}

/// Result of `profile`. Every field is null when the token does not resolve.
///
/// `id` is the user id rendered as a string, the shape existing clients read.
#[derive(SimpleObject, Default, Debug, PartialEq)]
pub struct ProfilePayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<User> for ProfilePayload {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id.to_string()),
            name: user.name,
            email: Some(user.email),
        }
    }
}

/// Result of the post mutations.
#[derive(SimpleObject)]
pub struct PostPayload {
    pub success: bool,
    pub post: Option<PostObject>,
}

impl PostPayload {
    pub fn done(post: Post) -> Self {
        Self {
            success: true,
            post: Some(PostObject(post)),
        }
    }
}

#[derive(SimpleObject)]
pub struct PostsPayload {
    pub posts: Vec<PostObject>,
}

// Inputs

#[derive(InputObject)]
pub struct UserCreateInput {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(InputObject)]
pub struct UserSigninInput {
    pub email: String,
    pub password: String,
}

#[derive(InputObject)]
pub struct ProfileInput {
    pub token: String,
}

#[derive(InputObject)]
pub struct PostCreateInput {
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub token: Option<String>,
}

#[derive(InputObject)]
pub struct PostUpdateInput {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub token: Option<String>,
}

#[derive(InputObject)]
pub struct PostDeleteInput {
    pub id: i32,
    pub token: Option<String>,
}
