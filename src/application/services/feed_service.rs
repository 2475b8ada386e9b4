//! Feed Service
//!
//! Read-path listings: the front-page feed, per-group and per-author
//! listings (all paginated), and single post lookup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::group_service::GroupDto;
use crate::application::services::post_service::PostDto;
use crate::domain::{GroupRepository, PostRepository, User, UserRepository};
use crate::shared::pagination::{Page, Paginator};

/// Feed service trait
#[async_trait]
pub trait FeedService: Send + Sync {
    /// All posts, newest first.
    async fn recent_posts(&self, page: i64) -> Result<PageDto<PostDto>, FeedError>;

    /// A group's posts, newest first. Fails if the slug is unknown.
    async fn group_posts(
        &self,
        slug: &str,
        page: i64,
    ) -> Result<(GroupDto, PageDto<PostDto>), FeedError>;

    /// An author's posts, newest first. Fails if the username is unknown.
    async fn author_posts(
        &self,
        username: &str,
        page: i64,
    ) -> Result<(AuthorDto, PageDto<PostDto>), FeedError>;

    /// A single post by ID.
    async fn post_detail(&self, post_id: i64) -> Result<PostDto, FeedError>;
}

/// A page of items plus paging metadata.
#[derive(Debug, Clone)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> From<Page<T>> for PageDto<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            items: page.items,
            number: page.number,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// Author data transfer object
#[derive(Debug, Clone)]
pub struct AuthorDto {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

impl From<User> for AuthorDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Feed service errors
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Post not found")]
    PostNotFound,

    #[error("Group not found")]
    GroupNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// FeedService implementation
pub struct FeedServiceImpl<P, G, U>
where
    P: PostRepository,
    G: GroupRepository,
    U: UserRepository,
{
    post_repo: Arc<P>,
    group_repo: Arc<G>,
    user_repo: Arc<U>,
    paginator: Paginator,
}

impl<P, G, U> FeedServiceImpl<P, G, U>
where
    P: PostRepository,
    G: GroupRepository,
    U: UserRepository,
{
    pub fn new(post_repo: Arc<P>, group_repo: Arc<G>, user_repo: Arc<U>, paginator: Paginator) -> Self {
        Self {
            post_repo,
            group_repo,
            user_repo,
            paginator,
        }
    }

    fn internal(e: impl std::fmt::Display) -> FeedError {
        FeedError::Internal(e.to_string())
    }
}

#[async_trait]
impl<P, G, U> FeedService for FeedServiceImpl<P, G, U>
where
    P: PostRepository + 'static,
    G: GroupRepository + 'static,
    U: UserRepository + 'static,
{
    async fn recent_posts(&self, page: i64) -> Result<PageDto<PostDto>, FeedError> {
        let total = self.post_repo.count_all().await.map_err(Self::internal)?;
        let number = self.paginator.clamp(page, total);

        let posts = self
            .post_repo
            .list_recent(self.paginator.page_size(), self.paginator.offset(number))
            .await
            .map_err(Self::internal)?;

        let page = self.paginator.assemble(posts, number, total);
        Ok(PageDto::from(page.map(PostDto::from)))
    }

    async fn group_posts(
        &self,
        slug: &str,
        page: i64,
    ) -> Result<(GroupDto, PageDto<PostDto>), FeedError> {
        let group = self
            .group_repo
            .find_by_slug(slug)
            .await
            .map_err(Self::internal)?
            .ok_or(FeedError::GroupNotFound)?;

        let total = self
            .post_repo
            .count_by_group(group.id)
            .await
            .map_err(Self::internal)?;
        let number = self.paginator.clamp(page, total);

        let posts = self
            .post_repo
            .list_by_group(group.id, self.paginator.page_size(), self.paginator.offset(number))
            .await
            .map_err(Self::internal)?;

        let page = self.paginator.assemble(posts, number, total);
        Ok((GroupDto::from(group), PageDto::from(page.map(PostDto::from))))
    }

    async fn author_posts(
        &self,
        username: &str,
        page: i64,
    ) -> Result<(AuthorDto, PageDto<PostDto>), FeedError> {
        let author = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(Self::internal)?
            .ok_or(FeedError::UserNotFound)?;

        let total = self
            .post_repo
            .count_by_author(author.id)
            .await
            .map_err(Self::internal)?;
        let number = self.paginator.clamp(page, total);

        let posts = self
            .post_repo
            .list_by_author(author.id, self.paginator.page_size(), self.paginator.offset(number))
            .await
            .map_err(Self::internal)?;

        let page = self.paginator.assemble(posts, number, total);
        Ok((AuthorDto::from(author), PageDto::from(page.map(PostDto::from))))
    }

    async fn post_detail(&self, post_id: i64) -> Result<PostDto, FeedError> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await
            .map_err(Self::internal)?
            .ok_or(FeedError::PostNotFound)?;

        Ok(PostDto::from(post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Group, Post};
    use crate::infrastructure::repositories::{
        InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
    };
    use pretty_assertions::assert_eq;

    type Service =
        FeedServiceImpl<InMemoryPostRepository, InMemoryGroupRepository, InMemoryUserRepository>;

    async fn seeded_service(post_count: i64) -> Service {
        let posts = Arc::new(InMemoryPostRepository::new());
        let groups = Arc::new(InMemoryGroupRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());

        groups
            .create(&Group {
                id: 1,
                title: "Travel".into(),
                slug: "travel".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        for n in 1..=post_count {
            posts
                .create(&Post {
                    id: n,
                    author_id: 7,
                    group_id: Some(1),
                    text: format!("post {n}"),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        FeedServiceImpl::new(posts, groups, users, Paginator::new(10))
    }

    #[tokio::test]
    async fn thirteen_group_posts_paginate_ten_then_three() {
        let service = seeded_service(13).await;

        let (group, first) = service.group_posts("travel", 1).await.unwrap();
        assert_eq!(group.slug, "travel");
        assert_eq!(first.items.len(), 10);
        assert!(first.has_next);

        let (_, second) = service.group_posts("travel", 2).await.unwrap();
        assert_eq!(second.items.len(), 3);
        assert!(!second.has_next);
        assert!(second.has_previous);
    }

    #[tokio::test]
    async fn unknown_group_slug_is_not_found() {
        let service = seeded_service(1).await;
        assert!(matches!(
            service.group_posts("missing", 1).await.unwrap_err(),
            FeedError::GroupNotFound
        ));
    }

    #[tokio::test]
    async fn page_past_the_end_clamps_to_last() {
        let service = seeded_service(13).await;
        let page = service.recent_posts(99).await.unwrap();
        assert_eq!(page.number, 2);
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn recent_posts_are_newest_first() {
        let service = seeded_service(13).await;
        let page = service.recent_posts(1).await.unwrap();
        assert_eq!(page.items[0].id, "13");
        assert_eq!(page.items[9].id, "4");
    }

    #[tokio::test]
    async fn unknown_post_id_is_not_found() {
        let service = seeded_service(3).await;
        assert!(matches!(
            service.post_detail(999).await.unwrap_err(),
            FeedError::PostNotFound
        ));
        assert_eq!(service.post_detail(2).await.unwrap().text, "post 2");
    }
}
