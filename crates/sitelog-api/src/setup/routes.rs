//! Route configuration and setup.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, patch, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::auth::middleware::session_middleware;
use crate::handlers::{
    checklists, groups, health, login, overview, photos, placeholders, projects, reports,
    templates, users,
};
use crate::state::AppState;
use sitelog_core::Config;

const MAX_BODY_BYTES: usize = 1024 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router> {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/auth/login", post(login::login))
        .route("/api/auth/logout", post(login::logout))
        .with_state(state.clone());

    let protected_routes = Router::new()
        // Pages (JSON view models)
        .route("/admin/overview", get(overview::overview_page))
        .route("/admin/projects", get(projects::projects_page))
        .route("/admin/projects/{id}", get(projects::project_detail_page))
        .route("/admin/photos", get(photos::photos_page))
        .route("/admin/checklists", get(checklists::checklists_page))
        .route(
            "/admin/checklists/{id}",
            get(checklists::checklist_detail_page),
        )
        .route("/admin/reports", get(reports::reports_page))
        .route("/admin/groups", get(groups::groups_page))
        .route("/admin/users", get(users::users_page))
        .route("/admin/templates", get(templates::templates_page))
        .route("/admin/portfolio", get(placeholders::portfolio_page))
        .route("/admin/integrations", get(placeholders::integrations_page))
        .route("/admin/map", get(placeholders::map_page))
        .route("/admin/payments", get(placeholders::payments_page))
        // Mutations
        .route("/api/admin/projects", post(projects::create_project))
        .route(
            "/api/admin/projects/{id}/documents",
            post(projects::create_document),
        )
        .route(
            "/api/admin/photos/{id}",
            patch(photos::update_photo).delete(photos::delete_photo),
        )
        .route("/api/admin/checklists", post(checklists::create_checklist))
        .route("/api/admin/reports", post(reports::create_report))
        .route("/api/admin/groups", post(groups::create_group))
        .route("/api/admin/users", post(users::invite_users))
        .route("/api/admin/templates/labels", post(templates::create_label))
        .route("/api/admin/templates/pages", post(templates::create_page))
        .route(
            "/api/admin/templates/checklists",
            post(templates::create_checklist_template),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state);

    let mut app = public_routes
        .merge(protected_routes)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = setup_cors(config)? {
        app = app.layer(cors);
    }

    Ok(app)
}

/// Build the CORS layer from configured origins. The console is same-origin
/// by default; no origins configured means no CORS layer at all.
fn setup_cors(config: &Config) -> Result<Option<CorsLayer>> {
    if config.cors_origins.is_empty() {
        return Ok(None);
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", origin, e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_credentials(true),
    ))
}
