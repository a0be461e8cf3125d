//! Photo gallery view model and photo mutations.
//!
//! Both mutations re-check the caller's scope against the specific photo row
//! before touching it; a photo outside the caller's scope is a 404, never a
//! hint that the row exists.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::resolve_photo_views;
use crate::state::AppState;
use sitelog_core::models::{normalize_notes, PhotoView, Project, UpdatePhotoRequest};
use sitelog_core::summary::restrict_to_projects;
use sitelog_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotosPageView {
    pub photos: Vec<PhotoView>,
    pub projects: Vec<Project>,
    pub can_edit: bool,
}

#[utoipa::path(
    get,
    path = "/admin/photos",
    tag = "pages",
    responses(
        (status = 200, description = "Photos view model", body = PhotosPageView),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "photos_page")
)]
pub async fn photos_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let projects = state.db.projects.list(&scope).await?;
    let entries = state.db.photos.list(&scope).await?;

    // The gallery shows unassigned photos to everyone; project-attached
    // photos only for projects the caller can see.
    let own_projects: HashSet<Uuid> = projects.iter().map(|p| p.id).collect();
    let photos: Vec<_> = entries.iter().map(|e| e.photo.clone()).collect();
    let visible_ids: HashSet<Uuid> =
        restrict_to_projects(photos, ctx.is_elevated(), &own_projects, true)
            .into_iter()
            .map(|p| p.id)
            .collect();
    let visible: Vec<_> = entries
        .into_iter()
        .filter(|e| visible_ids.contains(&e.photo.id))
        .collect();

    let photos = resolve_photo_views(&state.storage, visible).await;

    Ok(Json(PhotosPageView {
        photos,
        projects,
        can_edit: ctx.is_elevated(),
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoMutationResponse {
    pub success: bool,
}

#[utoipa::path(
    patch,
    path = "/api/admin/photos/{id}",
    tag = "photos",
    params(("id" = Uuid, Path, description = "Photo ID")),
    request_body = UpdatePhotoRequest,
    responses(
        (status = 200, description = "Photo metadata updated", body = PhotoMutationResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Photo not found in caller's scope", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, photo_id = %id, operation = "update_photo")
)]
pub async fn update_photo(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePhotoRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    state
        .db
        .photos
        .get_scoped(&scope, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

    let tags = request
        .tags
        .as_ref()
        .map(|t| t.normalize())
        .unwrap_or_default();
    let notes = normalize_notes(request.notes.as_deref());

    state
        .db
        .photos
        .update_meta(id, &tags, notes.as_deref())
        .await?;

    Ok(Json(PhotoMutationResponse { success: true }))
}

#[utoipa::path(
    delete,
    path = "/api/admin/photos/{id}",
    tag = "photos",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo deleted", body = PhotoMutationResponse),
        (status = 404, description = "Photo not found in caller's scope", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, photo_id = %id, operation = "delete_photo")
)]
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let photo = state
        .db
        .photos
        .get_scoped(&scope, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

    state.db.photos.delete(id).await?;

    // Best-effort removal of the stored object; the row is already gone and
    // an orphaned object is not worth failing the request over.
    if let Some(object_key) = photo.object_key.as_deref() {
        if let Err(e) = state.storage.delete(object_key).await {
            tracing::warn!(error = %e, photo_id = %id, object_key, "Failed to delete stored object");
        }
    }

    Ok(Json(PhotoMutationResponse { success: true }))
}
