//! Groups: list view model and creation with independent member inserts.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use sitelog_core::models::{CreateGroupRequest, GroupView};
use sitelog_core::{AppError, BatchOutcome, BatchReport};

#[utoipa::path(
    get,
    path = "/admin/groups",
    tag = "pages",
    responses(
        (status = 200, description = "Groups view model", body = [GroupView]),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "groups_page")
)]
pub async fn groups_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let groups = state.db.groups.list_with_counts(ctx.org_id).await?;
    Ok(Json(groups))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateGroupResponse {
    pub success: bool,
    pub group_id: Uuid,
    pub members: BatchReport,
}

#[utoipa::path(
    post,
    path = "/api/admin/groups",
    tag = "groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created, all members added", body = CreateGroupResponse),
        (status = 207, description = "Group created, some member inserts failed", body = CreateGroupResponse),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, member_count = request.member_ids.len(), operation = "create_group")
)]
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<CreateGroupRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Group name cannot be empty".to_string()).into());
    }

    let group = state
        .db
        .groups
        .create(name, ctx.org_id, ctx.user_id)
        .await?;

    // Each member is attempted independently; a failure is recorded and the
    // rest continue. Nothing rolls back the group row.
    let mut outcomes = Vec::with_capacity(request.member_ids.len());
    for member_id in &request.member_ids {
        match state.db.groups.add_member(group.id, *member_id).await {
            Ok(()) => outcomes.push(BatchOutcome::ok(member_id.to_string())),
            Err(e) => {
                tracing::error!(error = %e, group_id = %group.id, member_id = %member_id, "Failed to add group member");
                outcomes.push(BatchOutcome::err(
                    member_id.to_string(),
                    "Failed to add member",
                ));
            }
        }
    }

    let members = BatchReport::new(outcomes);
    let status = if members.any_failed() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(CreateGroupResponse {
            success: !members.any_failed(),
            group_id: group.id,
            members,
        }),
    ))
}
