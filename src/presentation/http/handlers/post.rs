//! Post Handlers
//!
//! Post detail plus the two authenticated write paths. The write handlers
//! mirror classic form-flow semantics over JSON: success answers with a
//! 303 redirect (to the author's profile on create, to the post detail on
//! edit) carrying the post as body, and a validation failure answers 400
//! with field errors for form re-display.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::request::PostFormRequest;
use crate::application::dto::response::{FormErrorResponse, PostResponse};
use crate::application::services::{
    CreatePostDto, EditOutcome, FeedError, FeedService, PostError, PostService, PostServiceImpl,
};
use crate::infrastructure::repositories::{PgGroupRepository, PgPostRepository};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::{AppError, FieldError};
use crate::startup::AppState;

fn post_service(state: &AppState) -> PostServiceImpl<PgPostRepository, PgGroupRepository> {
    PostServiceImpl::new(
        Arc::new(PgPostRepository::new(state.db.clone())),
        Arc::new(PgGroupRepository::new(state.db.clone())),
        state.snowflake.clone(),
    )
}

/// 400 response carrying the form state for re-display.
fn form_error(errors: Vec<FieldError>, is_edit: bool) -> Response {
    let message = errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    let body = FormErrorResponse {
        code: 10007,
        message,
        errors,
        is_edit,
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// 303 redirect with the affected post as body.
fn see_other(location: String, post: Option<PostResponse>) -> Response {
    match post {
        Some(body) => {
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)], Json(body)).into_response()
        }
        None => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
    }
}

/// Get a single post by ID
pub async fn post_detail(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let post_id: i64 = post_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid post ID".into()))?;

    let post = super::feed::feed_service(&state)
        .post_detail(post_id)
        .await
        .map_err(|e| match e {
            FeedError::PostNotFound => AppError::NotFound("Post not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(PostResponse::from(post)))
}

/// Publish a new post as the authenticated user
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<PostFormRequest>,
) -> Result<Response, AppError> {
    let request = CreatePostDto {
        text: body.text,
        group: body.group,
    };

    match post_service(&state).create_post(auth.user_id, request).await {
        Ok(post) => {
            let location = format!("/api/v1/users/{}/posts", auth.username);
            Ok(see_other(location, Some(PostResponse::from(post))))
        }
        Err(PostError::Form(errors)) => Ok(form_error(errors, false)),
        Err(PostError::NotFound) => Err(AppError::NotFound("Post not found".into())),
        Err(PostError::Internal(msg)) => Err(AppError::Internal(msg)),
    }
}

/// Edit a post; only its author may change it
pub async fn edit_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<String>,
    Json(body): Json<PostFormRequest>,
) -> Result<Response, AppError> {
    let post_id: i64 = post_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid post ID".into()))?;

    // Validation is the service's job and runs only after the post lookup
    // and the authorship check, so a non-author with a broken body still
    // gets the redirect and a missing post is still a 404.
    let request = CreatePostDto {
        text: body.text,
        group: body.group,
    };

    match post_service(&state)
        .edit_post(post_id, auth.user_id, request)
        .await
    {
        Ok(EditOutcome::Updated(post)) => {
            let location = format!("/api/v1/posts/{}", post.id);
            Ok(see_other(location, Some(PostResponse::from(post))))
        }
        // Silent authorization short-circuit: redirect to the detail page
        // without touching storage.
        Ok(EditOutcome::NotAuthor { post_id }) => {
            Ok(see_other(format!("/api/v1/posts/{}", post_id), None))
        }
        Err(PostError::Form(errors)) => Ok(form_error(errors, true)),
        Err(PostError::NotFound) => Err(AppError::NotFound("Post not found".into())),
        Err(PostError::Internal(msg)) => Err(AppError::Internal(msg)),
    }
}
