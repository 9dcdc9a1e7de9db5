use async_trait::async_trait;
use subtle::ConstantTimeEq;

use crate::domain::{Comment, ContentChanges, NewComment, NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Operations every repository supports, keyed by the entity's id.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Credential store.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Batch lookup; missing ids are simply absent from the result.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepoError>;

    /// Persist a new user. `RepoError::Duplicate` if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Look up by email, then compare digests in constant time.
    ///
    /// Only meaningful for deterministic digest schemes; salted schemes go
    /// through [`PasswordService::verify`](super::PasswordService::verify).
    async fn find_by_email_and_digest(
        &self,
        email: &str,
        digest: &str,
    ) -> Result<Option<User>, RepoError> {
        let user = self.find_by_email(email).await?;
        Ok(user.filter(|u| digests_match(&u.password_hash, digest)))
    }
}

/// Post store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError>;

    /// `RepoError::Constraint` if the author does not exist.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// `RepoError::NotFound` if the post does not exist.
    async fn update(&self, id: i32, changes: ContentChanges) -> Result<Post, RepoError>;
}

/// Comment store.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i32> {
    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;

    /// `RepoError::Constraint` if the author or the post does not exist.
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    /// `RepoError::NotFound` if the comment does not exist.
    async fn update(&self, id: i32, changes: ContentChanges) -> Result<Comment, RepoError>;
}

/// Constant-time digest comparison.
pub fn digests_match(stored: &str, candidate: &str) -> bool {
    stored.as_bytes().ct_eq(candidate.as_bytes()).into()
}
