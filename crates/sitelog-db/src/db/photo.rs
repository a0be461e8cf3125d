use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use sitelog_core::models::{Photo, PhotoRow};
use sitelog_core::{AccessScope, AppError};

const PHOTO_COLUMNS: &str = "p.id, p.name, p.url, p.object_key, p.org_id, p.project_id, \
     p.created_by, p.tags, p.notes, p.upload_status, p.status, p.created_at";

/// Photo with its project name resolved in the same query.
#[derive(Debug, Clone)]
pub struct PhotoListEntry {
    pub photo: Photo,
    pub project_name: Option<String>,
}

#[derive(FromRow)]
struct PhotoJoinRow {
    #[sqlx(flatten)]
    photo: PhotoRow,
    project_name: Option<String>,
}

#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Photos visible to the caller with project names, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select"))]
    pub async fn list(&self, scope: &AccessScope) -> Result<Vec<PhotoListEntry>, AppError> {
        let query = format!(
            "SELECT {}, pr.name AS project_name \
             FROM photos p LEFT JOIN projects pr ON pr.id = p.project_id \
             WHERE {} ORDER BY p.created_at DESC",
            PHOTO_COLUMNS,
            scope.qualified_predicate("p", 1)
        );

        let mut q = sqlx::query_as::<_, PhotoJoinRow>(&query).bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| PhotoListEntry {
                photo: row.photo.into_photo(),
                project_name: row.project_name,
            })
            .collect())
    }

    /// One photo inside the caller's scope, for the ownership re-check that
    /// precedes a mutation. None covers both "no such row" and "outside
    /// scope" so the two are indistinguishable to the client.
    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select", db.record_id = %id))]
    pub async fn get_scoped(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<Photo>, AppError> {
        let query = format!(
            "SELECT {} FROM photos p WHERE p.id = $1 AND {}",
            PHOTO_COLUMNS,
            scope.qualified_predicate("p", 2)
        );

        let mut q = sqlx::query_as::<_, PhotoRow>(&query)
            .bind(id)
            .bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }

        Ok(q.fetch_optional(&self.pool).await?.map(PhotoRow::into_photo))
    }

    /// Patch tags and notes.
    #[tracing::instrument(skip(self, tags, notes), fields(db.table = "photos", db.operation = "update", db.record_id = %id))]
    pub async fn update_meta(
        &self,
        id: Uuid,
        tags: &[String],
        notes: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE photos SET tags = $2, notes = $3 WHERE id = $1")
            .bind(id)
            .bind(tags)
            .bind(notes)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Hard delete. Irreversible; callers re-check scope first.
    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
