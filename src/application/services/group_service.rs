//! Group Service
//!
//! Topic group creation and lookup. Group creation is where the slug
//! derivation and uniqueness rules are enforced.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::forms::{self, FormError};
use crate::domain::{Group, GroupRepository};
use crate::shared::error::FieldError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Group service trait
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Create a new group, deriving the slug from the title when absent.
    async fn create_group(&self, request: CreateGroupDto) -> Result<GroupDto, GroupError>;

    /// Look up a group by its slug.
    async fn get_group(&self, slug: &str) -> Result<GroupDto, GroupError>;
}

/// Create group request
#[derive(Debug, Clone)]
pub struct CreateGroupDto {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Group data transfer object
#[derive(Debug, Clone)]
pub struct GroupDto {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<Group> for GroupDto {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.to_string(),
            title: group.title,
            slug: group.slug,
            description: group.description,
            created_at: group.created_at.to_rfc3339(),
        }
    }
}

/// Group service errors
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("Group not found")]
    NotFound,

    #[error("Validation failed")]
    Form(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FormError> for GroupError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Invalid(errors) => GroupError::Form(errors),
            FormError::Repository(e) => GroupError::Internal(e.to_string()),
        }
    }
}

/// GroupService implementation
pub struct GroupServiceImpl<G>
where
    G: GroupRepository,
{
    group_repo: Arc<G>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<G> GroupServiceImpl<G>
where
    G: GroupRepository,
{
    pub fn new(group_repo: Arc<G>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            group_repo,
            id_generator,
        }
    }
}

#[async_trait]
impl<G> GroupService for GroupServiceImpl<G>
where
    G: GroupRepository + 'static,
{
    async fn create_group(&self, request: CreateGroupDto) -> Result<GroupDto, GroupError> {
        let slug =
            forms::validate_slug(request.slug.as_deref(), &request.title, &*self.group_repo)
                .await?;

        let group = Group {
            id: self.id_generator.generate(),
            title: request.title,
            slug: slug.clone(),
            description: request.description,
            created_at: Utc::now(),
        };

        // The pre-check above can race with a concurrent creation of the
        // same slug; the unique constraint decides, and its violation is
        // reported as the same validation failure.
        let created = match self.group_repo.create(&group).await {
            Ok(created) => created,
            Err(e) if e.is_unique_violation() => {
                return Err(forms::slug_taken_error(&slug).into());
            }
            Err(e) => return Err(GroupError::Internal(e.to_string())),
        };

        tracing::info!(group_id = created.id, slug = %created.slug, "group created");

        Ok(GroupDto::from(created))
    }

    async fn get_group(&self, slug: &str) -> Result<GroupDto, GroupError> {
        let group = self
            .group_repo
            .find_by_slug(slug)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?
            .ok_or(GroupError::NotFound)?;

        Ok(GroupDto::from(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryGroupRepository;
    use pretty_assertions::assert_eq;

    fn service() -> GroupServiceImpl<InMemoryGroupRepository> {
        GroupServiceImpl::new(
            Arc::new(InMemoryGroupRepository::new()),
            Arc::new(SnowflakeGenerator::new(1)),
        )
    }

    #[tokio::test]
    async fn slug_is_derived_when_absent() {
        let service = service();
        let dto = service
            .create_group(CreateGroupDto {
                title: "Weekend Cooking".into(),
                slug: None,
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(dto.slug, "weekend-cooking");
    }

    #[tokio::test]
    async fn second_group_with_same_title_fails_validation() {
        let service = service();
        let request = CreateGroupDto {
            title: "Weekend Cooking".into(),
            slug: None,
            description: None,
        };
        service.create_group(request.clone()).await.unwrap();

        let err = service.create_group(request).await.unwrap_err();
        match err {
            GroupError::Form(errors) => {
                assert!(errors[0].message.contains("\"weekend-cooking\""));
            }
            other => panic!("expected form error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lookup_by_slug() {
        let service = service();
        service
            .create_group(CreateGroupDto {
                title: "Travel".into(),
                slug: Some("travel".into()),
                description: Some("Trip reports".into()),
            })
            .await
            .unwrap();

        let found = service.get_group("travel").await.unwrap();
        assert_eq!(found.title, "Travel");

        assert!(matches!(
            service.get_group("missing").await.unwrap_err(),
            GroupError::NotFound
        ));
    }
}
