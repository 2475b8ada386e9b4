//! In-Memory Repository Implementations
//!
//! Thread-safe fakes implementing the domain repository traits over plain
//! vectors. They exist so the service layer can be exercised without a
//! database, and they mirror the live behavior the services depend on:
//! newest-first ordering by ID and uniqueness enforcement on insert
//! (surfaced as `AppError::Conflict`, the in-memory analogue of the
//! PostgreSQL unique constraint).

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Group, GroupRepository, Post, PostRepository, User, UserRepository};
use crate::shared::error::AppError;

fn slice_page<T: Clone>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "username \"{}\" already exists",
                user.username
            )));
        }
        users.push(user.clone());
        Ok(user.clone())
    }
}

/// In-memory group store.
#[derive(Default)]
pub struct InMemoryGroupRepository {
    groups: RwLock<Vec<Group>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        Ok(self.groups.read().iter().find(|g| g.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, AppError> {
        Ok(self.groups.read().iter().find(|g| g.slug == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.groups.read().iter().any(|g| g.slug == slug))
    }

    async fn create(&self, group: &Group) -> Result<Group, AppError> {
        let mut groups = self.groups.write();
        if groups.iter().any(|g| g.slug == group.slug) {
            return Err(AppError::Conflict(format!(
                "slug \"{}\" already exists",
                group.slug
            )));
        }
        groups.push(group.clone());
        Ok(group.clone())
    }
}

/// In-memory post store.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored post, newest first.
    fn ordered(&self) -> Vec<Post> {
        let mut posts = self.posts.read().clone();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.posts.read().iter().find(|p| p.id == id).cloned())
    }

    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError> {
        Ok(slice_page(self.ordered(), limit, offset))
    }

    async fn list_by_group(
        &self,
        group_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError> {
        let filtered: Vec<Post> = self
            .ordered()
            .into_iter()
            .filter(|p| p.group_id == Some(group_id))
            .collect();
        Ok(slice_page(filtered, limit, offset))
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError> {
        let filtered: Vec<Post> = self
            .ordered()
            .into_iter()
            .filter(|p| p.author_id == author_id)
            .collect();
        Ok(slice_page(filtered, limit, offset))
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.posts.read().len() as i64)
    }

    async fn count_by_group(&self, group_id: i64) -> Result<i64, AppError> {
        Ok(self
            .posts
            .read()
            .iter()
            .filter(|p| p.group_id == Some(group_id))
            .count() as i64)
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        Ok(self
            .posts
            .read()
            .iter()
            .filter(|p| p.author_id == author_id)
            .count() as i64)
    }

    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        self.posts.write().push(post.clone());
        Ok(post.clone())
    }

    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        let mut posts = self.posts.write();
        let stored = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| AppError::NotFound("Post not found".into()))?;
        stored.text = post.text.clone();
        stored.group_id = post.group_id;
        stored.edited_at = post.edited_at;
        Ok(stored.clone())
    }
}
