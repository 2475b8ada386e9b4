//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::{AuthorDto, GroupDto, PageDto, PostDto};
use crate::shared::error::FieldError;

/// Post response
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub group_id: Option<String>,
    pub text: String,
    pub edited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
    pub created_at: String,
}

impl From<PostDto> for PostResponse {
    fn from(dto: PostDto) -> Self {
        Self {
            id: dto.id,
            author_id: dto.author_id,
            group_id: dto.group_id,
            text: dto.text,
            edited: dto.edited_at.is_some(),
            edited_at: dto.edited_at,
            created_at: dto.created_at,
        }
    }
}

/// Group response
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<GroupDto> for GroupResponse {
    fn from(dto: GroupDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            slug: dto.slug,
            description: dto.description,
            created_at: dto.created_at,
        }
    }
}

/// Author response (public profile view)
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

impl From<AuthorDto> for AuthorResponse {
    fn from(dto: AuthorDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            created_at: dto.created_at,
        }
    }
}

/// A page of items plus paging metadata.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T, U: From<T>> From<PageDto<T>> for PageResponse<U> {
    fn from(dto: PageDto<T>) -> Self {
        Self {
            items: dto.items.into_iter().map(U::from).collect(),
            page: dto.number,
            total_items: dto.total_items,
            total_pages: dto.total_pages,
            has_previous: dto.has_previous,
            has_next: dto.has_next,
        }
    }
}

/// Group listing response: the group plus a page of its posts.
#[derive(Debug, Serialize)]
pub struct GroupPostsResponse {
    pub group: GroupResponse,
    #[serde(flatten)]
    pub page: PageResponse<PostResponse>,
}

/// Profile listing response: the author plus a page of their posts.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: AuthorResponse,
    #[serde(flatten)]
    pub page: PageResponse<PostResponse>,
}

/// Form validation failure body, re-displayed by the client.
#[derive(Debug, Serialize)]
pub struct FormErrorResponse {
    pub code: u16,
    pub message: String,
    pub errors: Vec<FieldError>,
    pub is_edit: bool,
}
