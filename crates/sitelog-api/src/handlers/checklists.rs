//! Checklists: list/detail view models and creation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use sitelog_core::models::{
    ChecklistItem, CreateChecklistRequest, CreateChecklistResponse,
};
use sitelog_core::summary::ChecklistSummary;
use sitelog_core::AppError;

/// Checklist as listed, with its completion summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistView {
    pub id: Uuid,
    pub name: String,
    pub project_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub summary: ChecklistSummary,
}

#[utoipa::path(
    get,
    path = "/admin/checklists",
    tag = "pages",
    responses(
        (status = 200, description = "Checklists view model", body = [ChecklistView]),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "checklists_page")
)]
pub async fn checklists_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let entries = state.db.checklists.list_with_items(&scope).await?;

    let views: Vec<ChecklistView> = entries
        .into_iter()
        .map(|entry| ChecklistView {
            id: entry.checklist.id,
            name: entry.checklist.name,
            project_name: entry.project_name,
            created_at: entry.checklist.created_at,
            created_by: entry.checklist.created_by,
            summary: ChecklistSummary::from_states(&entry.states),
        })
        .collect();

    Ok(Json(views))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChecklistDetailView {
    pub id: Uuid,
    pub name: String,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ChecklistItem>,
    pub summary: ChecklistSummary,
}

#[utoipa::path(
    get,
    path = "/admin/checklists/{id}",
    tag = "pages",
    params(("id" = Uuid, Path, description = "Checklist ID")),
    responses(
        (status = 200, description = "Checklist detail view model", body = ChecklistDetailView),
        (status = 404, description = "Checklist not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, checklist_id = %id, operation = "checklist_detail_page")
)]
pub async fn checklist_detail_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let (checklist, items) = state
        .db
        .checklists
        .get_with_items(&scope, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Checklist not found".to_string()))?;

    let states: Vec<_> = items.iter().map(|item| item.state).collect();
    let summary = ChecklistSummary::from_states(&states);

    Ok(Json(ChecklistDetailView {
        id: checklist.id,
        name: checklist.name,
        project_id: checklist.project_id,
        created_at: checklist.created_at,
        items,
        summary,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/checklists",
    tag = "checklists",
    request_body = CreateChecklistRequest,
    responses(
        (status = 201, description = "Checklist created", body = CreateChecklistResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse),
        (status = 404, description = "Project or template not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "create_checklist")
)]
pub async fn create_checklist(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<CreateChecklistRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Checklist name cannot be empty".to_string()).into());
    }

    let scope = ctx.scope();
    state
        .db
        .projects
        .get(&scope, request.project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let item_texts = match request.template_id {
        Some(template_id) => {
            let template = state
                .db
                .catalog
                .get_checklist_template(ctx.org_id, template_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Checklist template not found".to_string()))?;
            template.items
        }
        None => Vec::new(),
    };

    let checklist_id = state
        .db
        .checklists
        .create(name, request.project_id, ctx.org_id, ctx.user_id, &item_texts)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateChecklistResponse {
            success: true,
            checklist_id,
        }),
    ))
}
