use std::sync::Arc;

use async_graphql::{Context, MergedObject, Object, Result};
use blog_core::domain::{ContentChanges, NewComment, NewPost};
use blog_core::services::{AuthService, ContentService, SignUp};

use super::error::gql;
use super::types::{
    AuthPayload, CommentObject, PostCreateInput, PostDeleteInput, PostPayload, PostUpdateInput,
    ProfileInput, ProfilePayload, UserCreateInput, UserObject, UserSigninInput,
};

#[derive(MergedObject, Default)]
pub struct MutationRoot(AccountMutation, PostMutation, CommentMutation);

#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    async fn signup_user(&self, ctx: &Context<'_>, data: UserCreateInput) -> Result<UserObject> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();
        let user = auth
            .sign_up(SignUp {
                name: data.name,
                email: data.email,
                password: data.password,
            })
            .await
            .map_err(gql)?;
        Ok(UserObject(user))
    }

    async fn signin_user(&self, ctx: &Context<'_>, data: UserSigninInput) -> Result<AuthPayload> {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();
        let outcome = auth
            .sign_in(&data.email, &data.password)
            .await
            .map_err(gql)?;
        Ok(AuthPayload {
            token: outcome.token,
            user: outcome.user.map(UserObject),
        })
    }

    /// Resolve a token to the account it was issued for.
    async fn profile(&self, ctx: &Context<'_>, data: ProfileInput) -> ProfilePayload {
        let auth = ctx.data_unchecked::<Arc<AuthService>>();
        match auth.profile(&data.token).await {
            Ok(Some(user)) => user.into(),
            Ok(None) => ProfilePayload::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Profile lookup failed");
                ProfilePayload::default()
            }
        }
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, data: PostCreateInput) -> Result<PostPayload> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let post = content
            .create_post(
                data.token.as_deref(),
                NewPost {
                    author_id: data.author_id,
                    title: data.title,
                    content: data.content,
                },
            )
            .await
            .map_err(gql)?;
        Ok(PostPayload::done(post))
    }

    async fn update_post(&self, ctx: &Context<'_>, data: PostUpdateInput) -> Result<PostPayload> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let changes = ContentChanges {
            title: data.title,
            content: data.content,
        };
        let post = content
            .update_post(data.token.as_deref(), data.id, changes)
            .await
            .map_err(gql)?;
        Ok(PostPayload::done(post))
    }

    /// Deletes the post and its comments. `post` holds the deleted record.
    async fn delete_post(&self, ctx: &Context<'_>, data: PostDeleteInput) -> Result<PostPayload> {
        let content = ctx.data_unchecked::<Arc<ContentService>>();
        let post = content
            .delete_post(data.token.as_deref(), data.id)
            .await
            .map_err(gql)?;
        Ok(PostPayload::done(post))
    }
}

#[derive(Default)]
pub struct CommentMutation;

#[Object]
impl CommentMutation {
    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
        author_id: i32,
        post_id: i32,
        token: Option<String>,
    ) -> Result<CommentObject> {
        let service = ctx.data_unchecked::<Arc<ContentService>>();
        let comment = service
            .create_comment(
                token.as_deref(),
                NewComment {
                    author_id,
                    post_id,
                    title,
                    content,
                },
            )
            .await
            .map_err(gql)?;
        Ok(CommentObject(comment))
    }

    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        id: i32,
        title: String,
        content: String,
        token: Option<String>,
    ) -> Result<CommentObject> {
        let service = ctx.data_unchecked::<Arc<ContentService>>();
        let comment = service
            .update_comment(token.as_deref(), id, ContentChanges { title, content })
            .await
            .map_err(gql)?;
        Ok(CommentObject(comment))
    }

    async fn delete_comment(
        &self,
        ctx: &Context<'_>,
        id: i32,
        token: Option<String>,
    ) -> Result<CommentObject> {
        let service = ctx.data_unchecked::<Arc<ContentService>>();
        let comment = service
            .delete_comment(token.as_deref(), id)
            .await
            .map_err(gql)?;
        Ok(CommentObject(comment))
    }
}
