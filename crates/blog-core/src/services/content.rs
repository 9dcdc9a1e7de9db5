//! Post and comment operations.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{Comment, ContentChanges, NewComment, NewPost, Post, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, PostRepository, TokenClaims, TokenService, UserRepository};

/// Who may call the content mutations.
///
/// Neither policy checks that the caller owns the resource being changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Any caller; a supplied token is verified for logging only.
    #[default]
    Open,
    /// The caller must supply a token that verifies.
    RequireToken,
}

impl FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "token" | "require-token" => Ok(Self::RequireToken),
            other => Err(format!("unknown write policy '{other}'")),
        }
    }
}

/// CRUD over posts and comments.
pub struct ContentService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    tokens: Arc<dyn TokenService>,
    policy: WritePolicy,
}

impl ContentService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        tokens: Arc<dyn TokenService>,
        policy: WritePolicy,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
            tokens,
            policy,
        }
    }

    fn authorize(
        &self,
        token: Option<&str>,
        action: &'static str,
    ) -> Result<Option<TokenClaims>, DomainError> {
        let claims = token.and_then(|t| self.tokens.verify(t));
        if claims.is_none() && self.policy == WritePolicy::RequireToken {
            tracing::warn!(action, "Write rejected: missing or invalid token");
            return Err(DomainError::Unauthenticated);
        }
        Ok(claims)
    }

    // Posts

    pub async fn get_post(&self, id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list().await?)
    }

    pub async fn posts_by_author(&self, author_id: i32) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(author_id).await?)
    }

    pub async fn create_post(
        &self,
        token: Option<&str>,
        post: NewPost,
    ) -> Result<Post, DomainError> {
        let caller = self.authorize(token, "create_post")?;
        require("title", &post.title)?;
        require("content", &post.content)?;

        let post = self.posts.create(post).await?;
        tracing::info!(
            post_id = post.id,
            author_id = post.author_id,
            caller = ?caller.map(|c| c.user_id),
            "Post created"
        );
        Ok(post)
    }

    pub async fn update_post(
        &self,
        token: Option<&str>,
        id: i32,
        changes: ContentChanges,
    ) -> Result<Post, DomainError> {
        let caller = self.authorize(token, "update_post")?;
        validate_changes(&changes)?;

        let post = self
            .posts
            .update(id, changes)
            .await
            .map_err(|e| with_context(e, "Post", id))?;
        tracing::info!(post_id = id, caller = ?caller.map(|c| c.user_id), "Post updated");
        Ok(post)
    }

    /// Deletes the post and its comments, returning the post as it was.
    pub async fn delete_post(&self, token: Option<&str>, id: i32) -> Result<Post, DomainError> {
        let caller = self.authorize(token, "delete_post")?;
        let post = self.get_post(id).await?;

        self.posts
            .delete(id)
            .await
            .map_err(|e| with_context(e, "Post", id))?;
        tracing::info!(post_id = id, caller = ?caller.map(|c| c.user_id), "Post deleted");
        Ok(post)
    }

    // Comments

    pub async fn get_comment(&self, id: i32) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Comment", id))
    }

    pub async fn comments_for_post(&self, post_id: i32) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_by_post(post_id).await?)
    }

    pub async fn create_comment(
        &self,
        token: Option<&str>,
        comment: NewComment,
    ) -> Result<Comment, DomainError> {
        let caller = self.authorize(token, "create_comment")?;
        require("title", &comment.title)?;
        require("content", &comment.content)?;

        let comment = self.comments.create(comment).await?;
        tracing::info!(
            comment_id = comment.id,
            post_id = comment.post_id,
            caller = ?caller.map(|c| c.user_id),
            "Comment created"
        );
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        token: Option<&str>,
        id: i32,
        changes: ContentChanges,
    ) -> Result<Comment, DomainError> {
        let caller = self.authorize(token, "update_comment")?;
        validate_changes(&changes)?;

        let comment = self
            .comments
            .update(id, changes)
            .await
            .map_err(|e| with_context(e, "Comment", id))?;
        tracing::info!(comment_id = id, caller = ?caller.map(|c| c.user_id), "Comment updated");
        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        token: Option<&str>,
        id: i32,
    ) -> Result<Comment, DomainError> {
        let caller = self.authorize(token, "delete_comment")?;
        let comment = self.get_comment(id).await?;

        self.comments
            .delete(id)
            .await
            .map_err(|e| with_context(e, "Comment", id))?;
        tracing::info!(comment_id = id, caller = ?caller.map(|c| c.user_id), "Comment deleted");
        Ok(comment)
    }

    // Authors

    /// Batch author lookup for nested resolution.
    pub async fn authors(&self, ids: &[i32]) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_by_ids(ids).await?)
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn validate_changes(changes: &ContentChanges) -> Result<(), DomainError> {
    require("title", &changes.title)?;
    require("content", &changes.content)
}

fn with_context(err: RepoError, entity_type: &'static str, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_policy() {
        assert_eq!("open".parse::<WritePolicy>(), Ok(WritePolicy::Open));
        assert_eq!(" Token ".parse::<WritePolicy>(), Ok(WritePolicy::RequireToken));
        assert!("owner".parse::<WritePolicy>().is_err());
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("title", "Hello").is_ok());
        assert!(matches!(
            require("title", "   "),
            Err(DomainError::Validation(msg)) if msg == "title is required"
        ));
    }
}
