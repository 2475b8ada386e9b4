//! Group entity and repository trait.
//!
//! A group is a named topic that posts can be filed under. Maps to the
//! `groups` table. Groups are created by administrators and are immutable
//! afterwards; posts reference them by ID.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a topic group.
///
/// Maps to the `groups` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - title: VARCHAR(200) NOT NULL
/// - slug: VARCHAR(100) NOT NULL UNIQUE
/// - description: TEXT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// The unique constraint on `slug` is the authoritative backstop for the
/// best-effort uniqueness pre-check in the form validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Display name (1-200 characters)
    pub title: String,

    /// URL-safe unique identifier (max 100 characters)
    pub slug: String,

    /// Free-text description
    pub description: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            slug: String::new(),
            description: None,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for Group data access operations.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find a group by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError>;

    /// Find a group by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, AppError>;

    /// Check whether a slug is already taken.
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Create a new group. Fails with a uniqueness violation if the slug is
    /// already taken.
    async fn create(&self, group: &Group) -> Result<Group, AppError>;
}
