//! Group Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::application::dto::request::CreateGroupRequest;
use crate::application::dto::response::{FormErrorResponse, GroupResponse};
use crate::application::services::{
    CreateGroupDto, GroupError, GroupService, GroupServiceImpl,
};
use crate::infrastructure::repositories::PgGroupRepository;
use crate::shared::error::{AppError, FieldError};
use crate::shared::validation;
use crate::startup::AppState;

fn group_service(state: &AppState) -> GroupServiceImpl<PgGroupRepository> {
    GroupServiceImpl::new(
        Arc::new(PgGroupRepository::new(state.db.clone())),
        state.snowflake.clone(),
    )
}

fn form_error(errors: Vec<FieldError>) -> Response {
    let message = errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    let body = FormErrorResponse {
        code: 10007,
        message,
        errors,
        is_edit: false,
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Create a new group (administrative)
pub async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<CreateGroupRequest>,
) -> Result<Response, AppError> {
    if let Err(e) = body.validate() {
        return Ok(form_error(validation::field_errors(&e)));
    }

    let request = CreateGroupDto {
        title: body.title,
        slug: body.slug,
        description: body.description,
    };

    match group_service(&state).create_group(request).await {
        Ok(group) => {
            Ok((StatusCode::CREATED, Json(GroupResponse::from(group))).into_response())
        }
        Err(GroupError::Form(errors)) => Ok(form_error(errors)),
        Err(GroupError::NotFound) => Err(AppError::NotFound("Group not found".into())),
        Err(GroupError::Internal(msg)) => Err(AppError::Internal(msg)),
    }
}

/// Get a group by slug
pub async fn group_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<GroupResponse>, AppError> {
    let group = group_service(&state)
        .get_group(&slug)
        .await
        .map_err(|e| match e {
            GroupError::NotFound => AppError::NotFound("Group not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(GroupResponse::from(group)))
}
