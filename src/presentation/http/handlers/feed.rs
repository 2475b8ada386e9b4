//! Feed Handlers
//!
//! Public read-path listings: front page, group listing, author profile.
//! All three paginate identically (newest first) and read the page number
//! from the query parameter named by `pagination.page_param`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::application::dto::response::{
    AuthorResponse, GroupPostsResponse, GroupResponse, PageResponse, PostResponse,
    ProfileResponse,
};
use crate::application::services::{FeedError, FeedService, FeedServiceImpl};
use crate::infrastructure::repositories::{
    PgGroupRepository, PgPostRepository, PgUserRepository,
};
use crate::shared::error::AppError;
use crate::shared::pagination::Paginator;
use crate::startup::AppState;

pub(super) fn feed_service(
    state: &AppState,
) -> FeedServiceImpl<PgPostRepository, PgGroupRepository, PgUserRepository> {
    FeedServiceImpl::new(
        Arc::new(PgPostRepository::new(state.db.clone())),
        Arc::new(PgGroupRepository::new(state.db.clone())),
        Arc::new(PgUserRepository::new(state.db.clone())),
        Paginator::new(state.settings.pagination.page_size),
    )
}

/// Resolve the requested page number from the configured query parameter.
/// Missing or non-numeric values resolve to page 1.
fn page_number(state: &AppState, params: &HashMap<String, String>) -> i64 {
    let raw = params
        .get(state.settings.pagination.page_param.as_str())
        .map(String::as_str);
    Paginator::parse_page(raw)
}

fn map_feed_error(e: FeedError) -> AppError {
    match e {
        FeedError::PostNotFound => AppError::NotFound("Post not found".into()),
        FeedError::GroupNotFound => AppError::NotFound("Group not found".into()),
        FeedError::UserNotFound => AppError::NotFound("User not found".into()),
        FeedError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Front page: all posts, newest first, paginated
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageResponse<PostResponse>>, AppError> {
    let page = page_number(&state, &params);

    let posts = feed_service(&state)
        .recent_posts(page)
        .await
        .map_err(map_feed_error)?;

    Ok(Json(PageResponse::from(posts)))
}

/// Posts filed under a group, looked up by slug
pub async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<GroupPostsResponse>, AppError> {
    let page = page_number(&state, &params);

    let (group, posts) = feed_service(&state)
        .group_posts(&slug, page)
        .await
        .map_err(map_feed_error)?;

    Ok(Json(GroupPostsResponse {
        group: GroupResponse::from(group),
        page: PageResponse::from(posts),
    }))
}

/// An author's posts, looked up by username
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ProfileResponse>, AppError> {
    let page = page_number(&state, &params);

    let (author, posts) = feed_service(&state)
        .author_posts(&username, page)
        .await
        .map_err(map_feed_error)?;

    Ok(Json(ProfileResponse {
        author: AuthorResponse::from(author),
        page: PageResponse::from(posts),
    }))
}
