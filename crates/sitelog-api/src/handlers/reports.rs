//! Reports: list view model and creation.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use sitelog_core::models::{CreateReportRequest, CreateReportResponse, Report};
use sitelog_core::AppError;

#[utoipa::path(
    get,
    path = "/admin/reports",
    tag = "pages",
    responses(
        (status = 200, description = "Reports view model", body = [Report]),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "reports_page")
)]
pub async fn reports_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let scope = ctx.scope();
    let reports = state.db.reports.list(&scope).await?;
    Ok(Json(reports))
}

#[utoipa::path(
    post,
    path = "/api/admin/reports",
    tag = "reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Report created as draft", body = CreateReportResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "create_report")
)]
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<CreateReportRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;

    let title = request.title.trim();
    let project_id = request.project_id.trim();
    if title.is_empty() || project_id.is_empty() {
        return Err(AppError::Validation("Title and project cannot be empty".to_string()).into());
    }
    let project_id = project_id
        .parse::<Uuid>()
        .map_err(|_| AppError::Validation("Project id must be a UUID".to_string()))?;

    let scope = ctx.scope();
    state
        .db
        .projects
        .get(&scope, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let report_id = state
        .db
        .reports
        .create(title, project_id, ctx.org_id, ctx.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            success: true,
            report_id,
        }),
    ))
}
