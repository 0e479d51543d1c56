//! Member API endpoints, nested under a class.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{validate, ApiJson, ApiResult};
use crate::models::{Member, MemberRequest, UpdateMemberRoleRequest};
use crate::AppState;

/// POST /api/classes/:id/members - Add a member to a class.
pub async fn add_member(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    ApiJson(request): ApiJson<MemberRequest>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    validate::require_non_blank("name", &request.name)?;

    let member = state.classes.add_member(&class_id, request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/classes/:id/members/:memberId - Change a member's role.
pub async fn update_member_role(
    State(state): State<AppState>,
    Path((class_id, member_id)): Path<(String, String)>,
    ApiJson(request): ApiJson<UpdateMemberRoleRequest>,
) -> ApiResult<Json<Member>> {
    validate::require_non_blank("role", &request.role)?;

    let member = state
        .classes
        .update_member_role(&class_id, &member_id, &request.role)
        .await?;
    Ok(Json(member))
}

/// DELETE /api/classes/:id/members/:memberId - Remove a member from a class.
pub async fn remove_member(
    State(state): State<AppState>,
    Path((class_id, member_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state.classes.remove_member(&class_id, &member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
