//! Class API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::{validate, ApiJson, ApiResult};
use crate::models::{Class, CreateClassRequest, UpdateClassRequest};
use crate::AppState;

/// Response body of the seed endpoint.
#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub message: String,
    pub created: usize,
}

/// POST /api/classes - Create a new class.
pub async fn create_class(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateClassRequest>,
) -> ApiResult<(StatusCode, Json<Class>)> {
    validate::require_non_blank("name", &request.name)?;
    validate::require_non_blank("code", &request.code)?;
    validate::optional_url("gitRepository", request.git_repository.as_deref())?;
    validate::optional_url("systemUrl", request.system_url.as_deref())?;

    let class = state.classes.create(request).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// GET /api/classes - List all classes ordered by name.
pub async fn list_classes(State(state): State<AppState>) -> ApiResult<Json<Vec<Class>>> {
    Ok(Json(state.classes.find_all().await?))
}

/// GET /api/classes/:id - Get a single class.
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Class>> {
    Ok(Json(state.classes.find_one(&id).await?))
}

/// GET /api/classes/code/:code - Get a class by its code.
pub async fn get_class_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Class>> {
    Ok(Json(state.classes.find_by_code(&code).await?))
}

/// PUT /api/classes/:id - Update links and/or replace the roster.
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateClassRequest>,
) -> ApiResult<Json<Class>> {
    validate::optional_url(
        "gitRepository",
        request.git_repository.as_ref().and_then(Option::as_deref),
    )?;
    validate::optional_url(
        "systemUrl",
        request.system_url.as_ref().and_then(Option::as_deref),
    )?;
    if let Some(members) = &request.members {
        for member in members {
            validate::require_non_blank("members.name", &member.name)?;
        }
    }

    Ok(Json(state.classes.update(&id, request).await?))
}

/// DELETE /api/classes/:id - Delete a class and its roster.
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.classes.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/classes/initialize - Create any missing default classes.
pub async fn initialize_classes(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<InitializeResponse>)> {
    let created = state.classes.initialize_default_classes().await?;

    Ok((
        StatusCode::CREATED,
        Json(InitializeResponse {
            message: "Default classes initialized successfully".to_string(),
            created: created.len(),
        }),
    ))
}
