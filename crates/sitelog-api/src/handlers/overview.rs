//! Dashboard view model.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::resolve_photo_views;
use crate::state::AppState;
use sitelog_core::models::PhotoView;
use sitelog_core::summary::upload_status_summary;

const RECENT_PHOTOS: usize = 12;

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewView {
    pub total_photos: usize,
    pub status_summary: BTreeMap<String, usize>,
    pub recent_photos: Vec<PhotoView>,
}

#[utoipa::path(
    get,
    path = "/admin/overview",
    tag = "pages",
    responses(
        (status = 200, description = "Dashboard view model", body = OverviewView),
        (status = 401, description = "No active session", body = ErrorResponse),
        (status = 404, description = "No profile for caller", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "overview_page")
)]
pub async fn overview_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let entries = state.db.photos.list(&scope).await?;

    let photos: Vec<_> = entries.iter().map(|e| e.photo.clone()).collect();
    let status_summary = upload_status_summary(&photos);
    let total_photos = photos.len();

    let recent: Vec<_> = entries.into_iter().take(RECENT_PHOTOS).collect();
    let recent_photos = resolve_photo_views(&state.storage, recent).await;

    Ok(Json(OverviewView {
        total_photos,
        status_summary,
        recent_photos,
    }))
}
