//! Catalog page: labels, album pages, and checklist templates.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use sitelog_core::models::{
    AlbumPage, ChecklistTemplate, CreateCatalogEntryRequest, CreateCatalogEntryResponse,
    CreateChecklistTemplateRequest, Label,
};
use sitelog_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplatesPageView {
    pub labels: Vec<Label>,
    pub pages: Vec<AlbumPage>,
    pub checklist_templates: Vec<ChecklistTemplate>,
}

#[utoipa::path(
    get,
    path = "/admin/templates",
    tag = "pages",
    responses(
        (status = 200, description = "Catalog view model", body = TemplatesPageView),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "templates_page")
)]
pub async fn templates_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let labels = state.db.catalog.list_labels(ctx.org_id).await?;
    let pages = state.db.catalog.list_pages(ctx.org_id).await?;
    let checklist_templates = state
        .db
        .catalog
        .list_checklist_templates(ctx.org_id)
        .await?;

    Ok(Json(TemplatesPageView {
        labels,
        pages,
        checklist_templates,
    }))
}

fn require_name(name: &str, what: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(name.to_string())
}

#[utoipa::path(
    post,
    path = "/api/admin/templates/labels",
    tag = "templates",
    request_body = CreateCatalogEntryRequest,
    responses(
        (status = 201, description = "Label created", body = CreateCatalogEntryResponse),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "create_label")
)]
pub async fn create_label(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<CreateCatalogEntryRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;
    let name = require_name(&request.name, "Label name")?;

    let id = state
        .db
        .catalog
        .create_label(
            &name,
            request.description.as_deref(),
            ctx.org_id,
            request.project_id,
            ctx.user_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCatalogEntryResponse { success: true, id }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/templates/pages",
    tag = "templates",
    request_body = CreateCatalogEntryRequest,
    responses(
        (status = 201, description = "Album page created", body = CreateCatalogEntryResponse),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "create_page")
)]
pub async fn create_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<CreateCatalogEntryRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;
    let title = require_name(&request.name, "Page title")?;

    let id = state
        .db
        .catalog
        .create_page(
            &title,
            request.description.as_deref(),
            ctx.org_id,
            request.project_id,
            ctx.user_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCatalogEntryResponse { success: true, id }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/templates/checklists",
    tag = "templates",
    request_body = CreateChecklistTemplateRequest,
    responses(
        (status = 201, description = "Checklist template created", body = CreateCatalogEntryResponse),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "create_checklist_template")
)]
pub async fn create_checklist_template(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<CreateChecklistTemplateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;
    let name = require_name(&request.name, "Template name")?;

    // Item texts keep their order; blank lines are dropped.
    let items: Vec<String> = request
        .items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();

    let id = state
        .db
        .catalog
        .create_checklist_template(&name, &items, ctx.org_id, ctx.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCatalogEntryResponse { success: true, id }),
    ))
}
