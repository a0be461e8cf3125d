use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use sitelog_core::models::{Report, ReportRow, ReportStatus};
use sitelog_core::{AccessScope, AppError};

const REPORT_COLUMNS: &str =
    "id, title, project_id, org_id, status, pdf_object_key, created_by, created_at, published_at";

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reports visible to the caller, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "reports", db.operation = "select"))]
    pub async fn list(&self, scope: &AccessScope) -> Result<Vec<Report>, AppError> {
        let query = format!(
            "SELECT {} FROM reports WHERE {} ORDER BY created_at DESC",
            REPORT_COLUMNS,
            scope.predicate(1)
        );

        let mut q = sqlx::query_as::<_, ReportRow>(&query).bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(ReportRow::into_report).collect())
    }

    /// Insert a report. New reports always start as drafts with no PDF.
    #[tracing::instrument(skip(self), fields(db.table = "reports", db.operation = "insert"))]
    pub async fn create(
        &self,
        title: &str,
        project_id: Uuid,
        org_id: Uuid,
        created_by: Uuid,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO reports (id, title, project_id, org_id, status, pdf_object_key, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, NULL, $6, $7)",
        )
        .bind(id)
        .bind(title)
        .bind(project_id)
        .bind(org_id)
        .bind(ReportStatus::Draft.as_str())
        .bind(created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }
}
