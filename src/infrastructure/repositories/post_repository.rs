//! Post Repository Implementation
//!
//! PostgreSQL implementation of post operations. Listing queries use
//! `LIMIT`/`OFFSET` paging with `ORDER BY id DESC` (snowflake IDs are
//! time-ordered, so this is newest-first).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Post, PostRepository};
use crate::shared::error::AppError;

/// PostgreSQL post repository implementation.
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Creates a new PgPostRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for post queries.
/// Maps to the posts table schema defined in the migration.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    group_id: Option<i64>,
    text: String,
    edited_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl PostRow {
    /// Converts database row to domain Post entity.
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            author_id: self.author_id,
            group_id: self.group_id,
            text: self.text,
            edited_at: self.edited_at,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_id, group_id, text, edited_at, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_id, group_id, text, edited_at, created_at
            FROM posts
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn list_by_group(
        &self,
        group_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_id, group_id, text, edited_at, created_at
            FROM posts
            WHERE group_id = $1
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(group_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, author_id, group_id, text, edited_at, created_at
            FROM posts
            WHERE author_id = $1
            ORDER BY id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn count_by_group(&self, group_id: i64) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (id, author_id, group_id, text, edited_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, author_id, group_id, text, edited_at, created_at
            "#,
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(post.group_id)
        .bind(&post.text)
        .bind(post.edited_at)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_post())
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET text = $2, group_id = $3, edited_at = $4
            WHERE id = $1
            RETURNING id, author_id, group_id, text, edited_at, created_at
            "#,
        )
        .bind(post.id)
        .bind(&post.text)
        .bind(post.group_id)
        .bind(post.edited_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_post())
            .ok_or_else(|| AppError::NotFound("Post not found".into()))
    }
}
