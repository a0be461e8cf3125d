use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use sitelog_core::models::Project;
use sitelog_core::{AccessScope, AppError};

const PROJECT_COLUMNS: &str = "id, name, org_id, created_by, created_at";

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Projects visible to the caller, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "select"))]
    pub async fn list(&self, scope: &AccessScope) -> Result<Vec<Project>, AppError> {
        let query = format!(
            "SELECT {} FROM projects WHERE {} ORDER BY created_at DESC",
            PROJECT_COLUMNS,
            scope.predicate(1)
        );

        let mut q = sqlx::query_as::<_, Project>(&query).bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// One project, or None when it does not exist inside the caller's scope.
    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, scope: &AccessScope, id: Uuid) -> Result<Option<Project>, AppError> {
        let query = format!(
            "SELECT {} FROM projects WHERE id = $1 AND {}",
            PROJECT_COLUMNS,
            scope.predicate(2)
        );

        let mut q = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }

        Ok(q.fetch_optional(&self.pool).await?)
    }

    /// Insert a project. The id is allocated by the caller so the new id can
    /// be returned to the client without a round trip.
    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "insert", db.record_id = %id))]
    pub async fn create(
        &self,
        id: Uuid,
        name: &str,
        org_id: Uuid,
        created_by: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO projects (id, name, org_id, created_by, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(name)
        .bind(org_id)
        .bind(created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
