//! Projects: page view models, creation, and project documents.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::checklists::ChecklistView;
use crate::services::resolve_photo_views;
use crate::state::AppState;
use sitelog_core::models::{
    CreateProjectRequest, CreateProjectResponse, PhotoView, ProjectDocument, ProjectView,
};
use sitelog_core::summary::{
    count_photos_by_project, restrict_to_projects, upload_status_summary, ChecklistSummary,
};
use sitelog_core::AppError;

const RECENT_PHOTOS: usize = 8;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectsPageView {
    pub projects: Vec<ProjectView>,
    pub unassigned_photos: usize,
    pub status_summary: BTreeMap<String, usize>,
    pub recent_photos: Vec<PhotoView>,
    pub can_manage: bool,
}

#[utoipa::path(
    get,
    path = "/admin/projects",
    tag = "pages",
    responses(
        (status = 200, description = "Projects view model", body = ProjectsPageView),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "projects_page")
)]
pub async fn projects_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let projects = state.db.projects.list(&scope).await?;
    let entries = state.db.photos.list(&scope).await?;

    let photos: Vec<_> = entries.iter().map(|e| e.photo.clone()).collect();
    let status_summary = upload_status_summary(&photos);
    let counts = count_photos_by_project(&photos);

    let project_views: Vec<ProjectView> = projects
        .iter()
        .map(|project| ProjectView {
            id: project.id,
            name: project.name.clone(),
            created_at: project.created_at,
            photo_count: counts.for_project(project.id),
        })
        .collect();

    // Non-elevated callers only see photos attached to their own projects
    // in the overview strip; unassigned photos stay out here.
    let own_projects: HashSet<Uuid> = projects.iter().map(|p| p.id).collect();
    let visible_ids: HashSet<Uuid> =
        restrict_to_projects(photos, ctx.is_elevated(), &own_projects, false)
            .into_iter()
            .map(|p| p.id)
            .collect();
    let recent: Vec<_> = entries
        .into_iter()
        .filter(|e| visible_ids.contains(&e.photo.id))
        .take(RECENT_PHOTOS)
        .collect();
    let recent_photos = resolve_photo_views(&state.storage, recent).await;

    Ok(Json(ProjectsPageView {
        projects: project_views,
        unassigned_photos: counts.unassigned,
        status_summary,
        recent_photos,
        can_manage: ctx.is_elevated(),
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetailView {
    pub id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub photo_count: usize,
    pub checklists: Vec<ChecklistView>,
    pub documents: Vec<ProjectDocument>,
}

#[utoipa::path(
    get,
    path = "/admin/projects/{id}",
    tag = "pages",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project detail view model", body = ProjectDetailView),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, project_id = %id, operation = "project_detail_page")
)]
pub async fn project_detail_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let project = state
        .db
        .projects
        .get(&scope, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let checklists = state.db.checklists.list_for_project(&scope, id).await?;
    let checklist_views = checklists
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

    let entries = state.db.photos.list(&scope).await?;
    let photos: Vec<_> = entries.into_iter().map(|e| e.photo).collect();
    let photo_count = count_photos_by_project(&photos).for_project(id);

    let documents = state.db.catalog.list_documents(ctx.org_id, id).await?;

    Ok(Json(ProjectDetailView {
        id: project.id,
        name: project.name,
        created_at: project.created_at,
        photo_count,
        checklists: checklist_views,
        documents,
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = CreateProjectResponse),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "create_project")
)]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Project name cannot be empty".to_string()).into());
    }

    // Allocate the id here so the client sees it without a read back.
    let project_id = Uuid::new_v4();
    state
        .db
        .projects
        .create(project_id, name, ctx.org_id, ctx.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponse {
            success: true,
            project_id,
        }),
    ))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub object_key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateDocumentResponse {
    pub success: bool,
    pub document_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/admin/projects/{id}/documents",
    tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document recorded", body = CreateDocumentResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, project_id = %id, operation = "create_document")
)]
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateDocumentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;

    let title = request.title.trim();
    let object_key = request.object_key.trim();
    if title.is_empty() || object_key.is_empty() {
        return Err(
            AppError::Validation("Title and object key cannot be empty".to_string()).into(),
        );
    }

    let scope = ctx.scope();
    state
        .db
        .projects
        .get(&scope, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let document_id = state
        .db
        .catalog
        .create_document(title, object_key, ctx.org_id, id, ctx.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDocumentResponse {
            success: true,
            document_id,
        }),
    ))
}
