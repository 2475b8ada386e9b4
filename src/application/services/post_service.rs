//! Post Service
//!
//! Write-path operations on posts: publish and edit.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::forms::{FormError, PostForm};
use crate::domain::{GroupRepository, Post, PostRepository};
use crate::shared::error::FieldError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// Publish a new post with the acting user as author.
    async fn create_post(
        &self,
        author_id: i64,
        request: CreatePostDto,
    ) -> Result<PostDto, PostError>;

    /// Edit an existing post.
    ///
    /// Only the author may edit. An edit attempt by anyone else leaves
    /// storage untouched and resolves to [`EditOutcome::NotAuthor`] so the
    /// handler can redirect to the post detail instead of reporting an
    /// error.
    async fn edit_post(
        &self,
        post_id: i64,
        actor_id: i64,
        request: CreatePostDto,
    ) -> Result<EditOutcome, PostError>;
}

/// Create/edit post request. `group` is the raw submitted identifier;
/// validation resolves it.
#[derive(Debug, Clone)]
pub struct CreatePostDto {
    pub text: String,
    pub group: Option<String>,
}

/// Post data transfer object
#[derive(Debug, Clone)]
pub struct PostDto {
    pub id: String,
    pub author_id: String,
    pub group_id: Option<String>,
    pub text: String,
    pub edited_at: Option<String>,
    pub created_at: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            group_id: post.group_id.map(|id| id.to_string()),
            text: post.text,
            edited_at: post.edited_at.map(|t| t.to_rfc3339()),
            created_at: post.created_at.to_rfc3339(),
        }
    }
}

/// Outcome of an edit attempt.
#[derive(Debug)]
pub enum EditOutcome {
    /// The acting user is the author and the post was updated in place.
    Updated(PostDto),
    /// The acting user is not the author; nothing was modified and the
    /// caller redirects to the post detail.
    NotAuthor { post_id: i64 },
}

/// Post service errors
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("Post not found")]
    NotFound,

    #[error("Validation failed")]
    Form(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FormError> for PostError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Invalid(errors) => PostError::Form(errors),
            FormError::Repository(e) => PostError::Internal(e.to_string()),
        }
    }
}

/// PostService implementation
pub struct PostServiceImpl<P, G>
where
    P: PostRepository,
    G: GroupRepository,
{
    post_repo: Arc<P>,
    group_repo: Arc<G>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<P, G> PostServiceImpl<P, G>
where
    P: PostRepository,
    G: GroupRepository,
{
    pub fn new(post_repo: Arc<P>, group_repo: Arc<G>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            post_repo,
            group_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl<P, G> PostService for PostServiceImpl<P, G>
where
    P: PostRepository + 'static,
    G: GroupRepository + 'static,
{
    async fn create_post(
        &self,
        author_id: i64,
        request: CreatePostDto,
    ) -> Result<PostDto, PostError> {
        let form = PostForm {
            text: request.text,
            group: request.group,
        };
        let validated = form.validate(&*self.group_repo).await?;

        let post = Post {
            id: self.id_generator.generate(),
            author_id,
            group_id: validated.group_id,
            text: validated.text,
            edited_at: None,
            created_at: Utc::now(),
        };

        let created = self
            .post_repo
            .create(&post)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?;

        tracing::debug!(post_id = created.id, author_id, "post published");

        Ok(PostDto::from(created))
    }

    async fn edit_post(
        &self,
        post_id: i64,
        actor_id: i64,
        request: CreatePostDto,
    ) -> Result<EditOutcome, PostError> {
        let mut post = self
            .post_repo
            .find_by_id(post_id)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?
            .ok_or(PostError::NotFound)?;

        // Non-authors are silently bounced back to the detail page rather
        // than shown an authorization error. This happens before the form
        // is even looked at, so an invalid body changes nothing.
        if !post.is_author(actor_id) {
            return Ok(EditOutcome::NotAuthor { post_id });
        }

        let form = PostForm {
            text: request.text,
            group: request.group,
        };
        let validated = form.validate(&*self.group_repo).await?;

        post.text = validated.text;
        post.group_id = validated.group_id;
        post.edited_at = Some(Utc::now());

        let updated = self
            .post_repo
            .update(&post)
            .await
            .map_err(|e| PostError::Internal(e.to_string()))?;

        Ok(EditOutcome::Updated(PostDto::from(updated)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Group;
    use crate::infrastructure::repositories::{InMemoryGroupRepository, InMemoryPostRepository};

    fn service() -> (
        PostServiceImpl<InMemoryPostRepository, InMemoryGroupRepository>,
        Arc<InMemoryPostRepository>,
        Arc<InMemoryGroupRepository>,
    ) {
        let posts = Arc::new(InMemoryPostRepository::new());
        let groups = Arc::new(InMemoryGroupRepository::new());
        let service = PostServiceImpl::new(
            posts.clone(),
            groups.clone(),
            Arc::new(SnowflakeGenerator::new(1)),
        );
        (service, posts, groups)
    }

    #[tokio::test]
    async fn create_without_group_leaves_group_unset() {
        let (service, posts, _) = service();

        let dto = service
            .create_post(
                7,
                CreatePostDto {
                    text: "hello".into(),
                    group: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(dto.text, "hello");
        assert_eq!(dto.author_id, "7");
        assert!(dto.group_id.is_none());
        assert_eq!(posts.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_with_empty_text_persists_nothing() {
        let (service, posts, _) = service();

        let err = service
            .create_post(
                7,
                CreatePostDto {
                    text: "".into(),
                    group: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PostError::Form(_)));
        assert_eq!(posts.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn edit_by_non_author_is_a_silent_redirect() {
        let (service, posts, groups) = service();
        groups
            .create(&Group {
                id: 1,
                title: "Travel".into(),
                slug: "travel".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let created = service
            .create_post(
                7,
                CreatePostDto {
                    text: "original".into(),
                    group: Some("1".into()),
                },
            )
            .await
            .unwrap();
        let post_id: i64 = created.id.parse().unwrap();

        let outcome = service
            .edit_post(
                post_id,
                8, // not the author
                CreatePostDto {
                    text: "hijacked".into(),
                    group: None,
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, EditOutcome::NotAuthor { .. }));
        let stored = posts.find_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(stored.text, "original");
        assert_eq!(stored.group_id, Some(1));
        assert!(!stored.is_edited());
    }

    #[tokio::test]
    async fn non_author_with_invalid_form_still_gets_the_redirect() {
        let (service, _, _) = service();

        let created = service
            .create_post(
                7,
                CreatePostDto {
                    text: "original".into(),
                    group: None,
                },
            )
            .await
            .unwrap();
        let post_id: i64 = created.id.parse().unwrap();

        // Authorship is resolved before the form: a blank body from a
        // non-author redirects rather than failing validation.
        let outcome = service
            .edit_post(
                post_id,
                8,
                CreatePostDto {
                    text: "".into(),
                    group: Some("not-a-number".into()),
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, EditOutcome::NotAuthor { post_id: id } if id == post_id));
    }

    #[tokio::test]
    async fn edit_of_missing_post_is_not_found_even_with_invalid_form() {
        let (service, _, _) = service();

        let err = service
            .edit_post(
                999,
                7,
                CreatePostDto {
                    text: "".into(),
                    group: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PostError::NotFound));
    }
}
