//! Post entity and repository trait.
//!
//! The unit of published content. Maps to the `posts` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a published post.
///
/// Maps to the `posts` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - author_id: BIGINT NOT NULL REFERENCES users(id)
/// - group_id: BIGINT NULL REFERENCES groups(id)
/// - text: TEXT NOT NULL
/// - edited_at: TIMESTAMPTZ NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// The author is set at creation and never changes; only the author may
/// update `text` and `group_id`. Posts are never deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Author user ID (immutable after creation)
    pub author_id: i64,

    /// Optional topic group
    pub group_id: Option<i64>,

    /// Post body (required, non-empty)
    pub text: String,

    /// Timestamp of the last edit (None if never edited)
    pub edited_at: Option<DateTime<Utc>>,

    /// Timestamp when the post was published
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Check if this post has been edited since publication.
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    /// Check if this post is filed under a group.
    pub fn has_group(&self) -> bool {
        self.group_id.is_some()
    }

    /// Check if a user is the author of this post.
    pub fn is_author(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: 0,
            author_id: 0,
            group_id: None,
            text: String::new(),
            edited_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for Post data access operations.
///
/// All listing methods return posts newest-first (`ORDER BY id DESC`;
/// snowflake IDs are time-ordered) with `LIMIT`/`OFFSET` paging driven by
/// the pagination helper.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// List posts across all groups and authors, newest first.
    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError>;

    /// List posts filed under a group, newest first.
    async fn list_by_group(
        &self,
        group_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError>;

    /// List posts written by an author, newest first.
    async fn list_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError>;

    /// Total number of posts.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Number of posts filed under a group.
    async fn count_by_group(&self, group_id: i64) -> Result<i64, AppError>;

    /// Number of posts written by an author.
    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;

    /// Create a new post.
    async fn create(&self, post: &Post) -> Result<Post, AppError>;

    /// Update an existing post (text, group, edited_at).
    async fn update(&self, post: &Post) -> Result<Post, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edited_flag_follows_edited_at() {
        let mut post = Post::default();
        assert!(!post.is_edited());
        post.edited_at = Some(Utc::now());
        assert!(post.is_edited());
    }

    #[test]
    fn authorship_check() {
        let post = Post {
            author_id: 42,
            ..Default::default()
        };
        assert!(post.is_author(42));
        assert!(!post.is_author(7));
    }
}
