//! Placeholder pages for features that exist in navigation but are not built
//! yet. Still session-gated so they behave like every other admin page.

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError};

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceholderView {
    pub feature: &'static str,
    pub available: bool,
}

fn placeholder(feature: &'static str) -> Json<PlaceholderView> {
    Json(PlaceholderView {
        feature,
        available: false,
    })
}

#[utoipa::path(
    get,
    path = "/admin/portfolio",
    tag = "pages",
    responses(
        (status = 200, description = "Placeholder view model", body = PlaceholderView),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
pub async fn portfolio_page(_ctx: SessionContext) -> Result<impl IntoResponse, HttpAppError> {
    Ok(placeholder("portfolio"))
}

#[utoipa::path(
    get,
    path = "/admin/integrations",
    tag = "pages",
    responses(
        (status = 200, description = "Placeholder view model", body = PlaceholderView),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
pub async fn integrations_page(_ctx: SessionContext) -> Result<impl IntoResponse, HttpAppError> {
    Ok(placeholder("integrations"))
}

#[utoipa::path(
    get,
    path = "/admin/map",
    tag = "pages",
    responses(
        (status = 200, description = "Placeholder view model", body = PlaceholderView),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
pub async fn map_page(_ctx: SessionContext) -> Result<impl IntoResponse, HttpAppError> {
    Ok(placeholder("map"))
}

#[utoipa::path(
    get,
    path = "/admin/payments",
    tag = "pages",
    responses(
        (status = 200, description = "Placeholder view model", body = PlaceholderView),
        (status = 401, description = "No active session", body = ErrorResponse)
    )
)]
pub async fn payments_page(_ctx: SessionContext) -> Result<impl IntoResponse, HttpAppError> {
    Ok(placeholder("payments"))
}
