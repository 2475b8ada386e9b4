//! Group Repository Implementation
//!
//! PostgreSQL implementation of group operations. The UNIQUE constraint on
//! `groups.slug` is the authoritative uniqueness check; the application-level
//! slug validation is only a pre-check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Group, GroupRepository};
use crate::shared::error::AppError;

/// PostgreSQL group repository implementation.
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Creates a new PgGroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for group queries.
#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: i64,
    title: String,
    slug: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_group(self) -> Group {
        Group {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, title, slug, description, created_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_group()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, title, slug, description, created_at
            FROM groups
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_group()))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM groups WHERE slug = $1)")
                .bind(slug)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    async fn create(&self, group: &Group) -> Result<Group, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            INSERT INTO groups (id, title, slug, description, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, slug, description, created_at
            "#,
        )
        .bind(group.id)
        .bind(&group.title)
        .bind(&group.slug)
        .bind(&group.description)
        .bind(group.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_group())
    }
}
