//! Catalog records: labels, album pages, checklist templates, and project
//! documents. Simple org-scoped rows with no derived logic.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use sitelog_core::models::{
    AlbumPage, ChecklistTemplate, ChecklistTemplateRow, Label, ProjectDocument,
};
use sitelog_core::AppError;

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "labels", db.operation = "select"))]
    pub async fn list_labels(&self, org_id: Uuid) -> Result<Vec<Label>, AppError> {
        let rows = sqlx::query_as::<_, Label>(
            "SELECT id, name, description, org_id, project_id, created_by, created_at \
             FROM labels WHERE org_id = $1 ORDER BY created_at DESC",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "labels", db.operation = "insert"))]
    pub async fn create_label(
        &self,
        name: &str,
        description: Option<&str>,
        org_id: Uuid,
        project_id: Option<Uuid>,
        created_by: Uuid,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO labels (id, name, description, org_id, project_id, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(org_id)
        .bind(project_id)
        .bind(created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "album_pages", db.operation = "select"))]
    pub async fn list_pages(&self, org_id: Uuid) -> Result<Vec<AlbumPage>, AppError> {
        let rows = sqlx::query_as::<_, AlbumPage>(
            "SELECT id, title, description, org_id, project_id, created_by, created_at \
             FROM album_pages WHERE org_id = $1 ORDER BY created_at DESC",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "album_pages", db.operation = "insert"))]
    pub async fn create_page(
        &self,
        title: &str,
        description: Option<&str>,
        org_id: Uuid,
        project_id: Option<Uuid>,
        created_by: Uuid,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO album_pages (id, title, description, org_id, project_id, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(org_id)
        .bind(project_id)
        .bind(created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "checklist_templates", db.operation = "select"))]
    pub async fn list_checklist_templates(
        &self,
        org_id: Uuid,
    ) -> Result<Vec<ChecklistTemplate>, AppError> {
        let rows = sqlx::query_as::<_, ChecklistTemplateRow>(
            "SELECT id, name, org_id, items, created_by, created_at \
             FROM checklist_templates WHERE org_id = $1 ORDER BY created_at DESC",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(ChecklistTemplateRow::into_template)
            .collect())
    }

    /// One template, org-checked.
    #[tracing::instrument(skip(self), fields(db.table = "checklist_templates", db.operation = "select", db.record_id = %id))]
    pub async fn get_checklist_template(
        &self,
        org_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ChecklistTemplate>, AppError> {
        let row = sqlx::query_as::<_, ChecklistTemplateRow>(
            "SELECT id, name, org_id, items, created_by, created_at \
             FROM checklist_templates WHERE id = $1 AND org_id = $2",
        )
        .bind(id)
        .bind(org_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ChecklistTemplateRow::into_template))
    }

    #[tracing::instrument(skip(self, items), fields(db.table = "checklist_templates", db.operation = "insert"))]
    pub async fn create_checklist_template(
        &self,
        name: &str,
        items: &[String],
        org_id: Uuid,
        created_by: Uuid,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO checklist_templates (id, name, org_id, items, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(name)
        .bind(org_id)
        .bind(items)
        .bind(created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    #[tracing::instrument(skip(self), fields(db.table = "project_documents", db.operation = "select"))]
    pub async fn list_documents(
        &self,
        org_id: Uuid,
        project_id: Uuid,
    ) -> Result<Vec<ProjectDocument>, AppError> {
        let rows = sqlx::query_as::<_, ProjectDocument>(
            "SELECT id, title, object_key, org_id, project_id, created_by, created_at \
             FROM project_documents WHERE org_id = $1 AND project_id = $2 ORDER BY created_at DESC",
        )
        .bind(org_id)
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    #[tracing::instrument(skip(self), fields(db.table = "project_documents", db.operation = "insert"))]
    pub async fn create_document(
        &self,
        title: &str,
        object_key: &str,
        org_id: Uuid,
        project_id: Uuid,
        created_by: Uuid,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO project_documents (id, title, object_key, org_id, project_id, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(title)
        .bind(object_key)
        .bind(org_id)
        .bind(project_id)
        .bind(created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }
}
