//! Publishing Flow Tests
//!
//! End-to-end exercises of the service layer over the in-memory
//! repositories: publish, edit, and browse paginated listings.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;

use blog_server::application::services::{
    CreateGroupDto, CreatePostDto, EditOutcome, FeedService, FeedServiceImpl, GroupService,
    GroupServiceImpl, PostError, PostService, PostServiceImpl,
};
use blog_server::domain::{PostRepository, User, UserRepository};
use blog_server::infrastructure::repositories::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};
use blog_server::shared::pagination::Paginator;
use blog_server::shared::snowflake::SnowflakeGenerator;

const PAGE_SIZE: i64 = 10;

struct TestEnv {
    posts: Arc<InMemoryPostRepository>,
    groups: Arc<InMemoryGroupRepository>,
    users: Arc<InMemoryUserRepository>,
    snowflake: Arc<SnowflakeGenerator>,
}

impl TestEnv {
    async fn new() -> Self {
        let env = Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            snowflake: Arc::new(SnowflakeGenerator::new(1)),
        };

        env.users
            .create(&User {
                id: 1,
                username: "alice".into(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        env.users
            .create(&User {
                id: 2,
                username: "bob".into(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        env
    }

    fn post_service(&self) -> PostServiceImpl<InMemoryPostRepository, InMemoryGroupRepository> {
        PostServiceImpl::new(self.posts.clone(), self.groups.clone(), self.snowflake.clone())
    }

    fn group_service(&self) -> GroupServiceImpl<InMemoryGroupRepository> {
        GroupServiceImpl::new(self.groups.clone(), self.snowflake.clone())
    }

    fn feed_service(
        &self,
    ) -> FeedServiceImpl<InMemoryPostRepository, InMemoryGroupRepository, InMemoryUserRepository>
    {
        FeedServiceImpl::new(
            self.posts.clone(),
            self.groups.clone(),
            self.users.clone(),
            Paginator::new(PAGE_SIZE),
        )
    }

    async fn create_group(&self, title: &str) -> i64 {
        let group = self
            .group_service()
            .create_group(CreateGroupDto {
                title: title.into(),
                slug: None,
                description: None,
            })
            .await
            .unwrap();
        group.id.parse().unwrap()
    }
}

#[tokio::test]
async fn create_post_persists_exactly_one_post_for_the_acting_user() {
    let env = TestEnv::new().await;
    let group_id = env.create_group("Travel").await;

    let created = env
        .post_service()
        .create_post(
            1,
            CreatePostDto {
                text: "hello".into(),
                group: Some(group_id.to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(env.posts.count_all().await.unwrap(), 1);
    assert_eq!(created.author_id, "1");
    assert_eq!(created.group_id.as_deref(), Some(group_id.to_string().as_str()));
    assert_eq!(created.text, "hello");
}

#[tokio::test]
async fn create_post_without_group_leaves_group_unset() {
    let env = TestEnv::new().await;

    let created = env
        .post_service()
        .create_post(
            1,
            CreatePostDto {
                text: "hello".into(),
                group: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(created.group_id, None);
    assert_eq!(created.author_id, "1");
}

#[tokio::test]
async fn edit_by_author_updates_in_place_without_creating_a_post() {
    let env = TestEnv::new().await;
    let travel = env.create_group("Travel").await;
    let cooking = env.create_group("Cooking").await;

    let created = env
        .post_service()
        .create_post(
            1,
            CreatePostDto {
                text: "first draft".into(),
                group: Some(travel.to_string()),
            },
        )
        .await
        .unwrap();
    let post_id: i64 = created.id.parse().unwrap();
    assert_eq!(env.posts.count_all().await.unwrap(), 1);

    let outcome = env
        .post_service()
        .edit_post(
            post_id,
            1,
            CreatePostDto {
                text: "second draft".into(),
                group: Some(cooking.to_string()),
            },
        )
        .await
        .unwrap();

    let updated = match outcome {
        EditOutcome::Updated(dto) => dto,
        other => panic!("expected update, got {other:?}"),
    };
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.text, "second draft");
    assert!(updated.edited_at.is_some());

    // Updated in place, not republished.
    assert_eq!(env.posts.count_all().await.unwrap(), 1);
    let stored = env.posts.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(stored.text, "second draft");
    assert_eq!(stored.group_id, Some(cooking));
}

#[tokio::test]
async fn edit_by_non_author_redirects_and_leaves_storage_unchanged() {
    let env = TestEnv::new().await;

    let created = env
        .post_service()
        .create_post(
            1,
            CreatePostDto {
                text: "alice's post".into(),
                group: None,
            },
        )
        .await
        .unwrap();
    let post_id: i64 = created.id.parse().unwrap();

    let outcome = env
        .post_service()
        .edit_post(
            post_id,
            2, // bob
            CreatePostDto {
                text: "bob's rewrite".into(),
                group: None,
            },
        )
        .await
        .unwrap();

    match outcome {
        EditOutcome::NotAuthor { post_id: id } => assert_eq!(id, post_id),
        other => panic!("expected silent redirect, got {other:?}"),
    }

    let stored = env.posts.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(stored.text, "alice's post");
    assert!(!stored.is_edited());
}

#[tokio::test]
async fn non_author_redirect_wins_over_form_validation() {
    let env = TestEnv::new().await;

    let created = env
        .post_service()
        .create_post(
            1,
            CreatePostDto {
                text: "alice's post".into(),
                group: None,
            },
        )
        .await
        .unwrap();
    let post_id: i64 = created.id.parse().unwrap();

    // A non-author submitting a body that would fail validation still
    // gets the redirect, not a validation error.
    let outcome = env
        .post_service()
        .edit_post(
            post_id,
            2,
            CreatePostDto {
                text: "".into(),
                group: Some("garbage".into()),
            },
        )
        .await
        .unwrap();
    assert!(matches!(outcome, EditOutcome::NotAuthor { post_id: id } if id == post_id));

    // And an edit of a post that does not exist is a lookup failure, not
    // a validation one.
    let err = env
        .post_service()
        .edit_post(
            post_id + 1,
            1,
            CreatePostDto {
                text: "".into(),
                group: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::NotFound));
}

#[tokio::test]
async fn group_listing_paginates_thirteen_posts_into_ten_and_three() {
    let env = TestEnv::new().await;
    let group_id = env.create_group("Travel").await;

    for n in 0..13 {
        env.post_service()
            .create_post(
                1,
                CreatePostDto {
                    text: format!("post {n}"),
                    group: Some(group_id.to_string()),
                },
            )
            .await
            .unwrap();
    }

    let feed = env.feed_service();

    let (_, first) = feed.group_posts("travel", 1).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_items, 13);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next);
    assert!(!first.has_previous);

    let (_, second) = feed.group_posts("travel", 2).await.unwrap();
    assert_eq!(second.items.len(), 3);
    assert!(!second.has_next);
}

#[tokio::test]
async fn profile_listing_only_contains_the_authors_posts() {
    let env = TestEnv::new().await;

    for n in 0..3 {
        env.post_service()
            .create_post(
                1,
                CreatePostDto {
                    text: format!("alice {n}"),
                    group: None,
                },
            )
            .await
            .unwrap();
    }
    env.post_service()
        .create_post(
            2,
            CreatePostDto {
                text: "bob 0".into(),
                group: None,
            },
        )
        .await
        .unwrap();

    let (author, page) = env.feed_service().author_posts("alice", 1).await.unwrap();
    assert_eq!(author.username, "alice");
    assert_eq!(page.total_items, 3);
    assert!(page.items.iter().all(|p| p.author_id == "1"));
}

#[tokio::test]
async fn listing_totals_match_underlying_counts() {
    let env = TestEnv::new().await;
    let group_id = env.create_group("Travel").await;

    for n in 0..25 {
        let group = if n % 2 == 0 {
            Some(group_id.to_string())
        } else {
            None
        };
        env.post_service()
            .create_post(
                1,
                CreatePostDto {
                    text: format!("post {n}"),
                    group,
                },
            )
            .await
            .unwrap();
    }

    let feed = env.feed_service();

    let all = feed.recent_posts(1).await.unwrap();
    assert_eq!(all.total_items, 25);
    assert_eq!(all.total_pages, 3);

    let mut seen = 0;
    for number in 1..=all.total_pages {
        let page = feed.recent_posts(number).await.unwrap();
        assert!(page.items.len() as i64 <= PAGE_SIZE);
        seen += page.items.len() as i64;
    }
    assert_eq!(seen, 25);

    let (_, grouped) = feed.group_posts("travel", 1).await.unwrap();
    assert_eq!(grouped.total_items, 13);
}

#[tokio::test]
async fn two_groups_deriving_the_same_slug_conflict() {
    let env = TestEnv::new().await;
    env.create_group("Weekend Plans").await;

    let err = env
        .group_service()
        .create_group(CreateGroupDto {
            title: "Weekend Plans".into(),
            slug: None,
            description: None,
        })
        .await
        .unwrap_err();

    let msg = match err {
        blog_server::application::services::GroupError::Form(errors) => {
            errors[0].message.clone()
        }
        other => panic!("expected form error, got {other:?}"),
    };
    assert!(msg.contains("\"weekend-plans\""));
}
