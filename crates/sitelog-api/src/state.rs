//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`.

use std::sync::Arc;

use sqlx::PgPool;

use sitelog_auth::AuthService;
use sitelog_core::Config;
use sitelog_db::{
    CatalogRepository, ChecklistRepository, GroupRepository, PhotoRepository, ProfileRepository,
    ProjectRepository, ReportRepository,
};
use sitelog_storage::Storage;

/// Database pool and all repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub profiles: ProfileRepository,
    pub projects: ProjectRepository,
    pub photos: PhotoRepository,
    pub checklists: ChecklistRepository,
    pub reports: ReportRepository,
    pub groups: GroupRepository,
    pub catalog: CatalogRepository,
}

impl DbState {
    pub fn new(pool: PgPool) -> Self {
        DbState {
            profiles: ProfileRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            photos: PhotoRepository::new(pool.clone()),
            checklists: ChecklistRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            catalog: CatalogRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub storage: Arc<dyn Storage>,
    pub auth: Arc<dyn AuthService>,
    pub config: Config,
    pub is_production: bool,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
