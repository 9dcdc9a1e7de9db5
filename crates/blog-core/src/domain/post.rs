use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a blog article written by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub content: String,
}

/// Replacement title and content for an existing post or comment.
#[derive(Debug, Clone)]
pub struct ContentChanges {
    pub title: String,
    pub content: String,
}
