use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use sitelog_core::models::{Checklist, ChecklistItem, ChecklistItemRow, ItemState};
use sitelog_core::{AccessScope, AppError};

const CHECKLIST_COLUMNS: &str = "c.id, c.name, c.project_id, c.org_id, c.created_by, c.created_at";
const ITEM_COLUMNS: &str = "id, checklist_id, text, state, position";

/// Checklist with its project name and item states, as listed on the
/// checklists page.
#[derive(Debug, Clone)]
pub struct ChecklistListEntry {
    pub checklist: Checklist,
    pub project_name: Option<String>,
    pub states: Vec<ItemState>,
}

#[derive(FromRow)]
struct ChecklistJoinRow {
    #[sqlx(flatten)]
    checklist: Checklist,
    project_name: Option<String>,
}

#[derive(Clone)]
pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Checklists visible to the caller with their item states, newest first.
    /// Items are fetched in one batch query to avoid an N+1.
    #[tracing::instrument(skip(self), fields(db.table = "checklists", db.operation = "select"))]
    pub async fn list_with_items(
        &self,
        scope: &AccessScope,
    ) -> Result<Vec<ChecklistListEntry>, AppError> {
        let query = format!(
            "SELECT {}, pr.name AS project_name \
             FROM checklists c LEFT JOIN projects pr ON pr.id = c.project_id \
             WHERE {} ORDER BY c.created_at DESC",
            CHECKLIST_COLUMNS,
            scope.qualified_predicate("c", 1)
        );

        let mut q = sqlx::query_as::<_, ChecklistJoinRow>(&query).bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }
        let rows = q.fetch_all(&self.pool).await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.checklist.id).collect();
        let mut states_by_checklist = self.item_states_batch(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let states = states_by_checklist
                    .remove(&row.checklist.id)
                    .unwrap_or_default();
                ChecklistListEntry {
                    checklist: row.checklist,
                    project_name: row.project_name,
                    states,
                }
            })
            .collect())
    }

    /// Item states for many checklists in one query.
    async fn item_states_batch(
        &self,
        checklist_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ItemState>>, AppError> {
        if checklist_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT checklist_id, state FROM checklist_items \
             WHERE checklist_id = ANY($1) ORDER BY position",
        )
        .bind(checklist_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut map: HashMap<Uuid, Vec<ItemState>> = HashMap::new();
        for (checklist_id, state) in rows {
            let state = ItemState::parse(&state).unwrap_or(ItemState::Todo);
            map.entry(checklist_id).or_default().push(state);
        }
        Ok(map)
    }

    /// One checklist with its full item list.
    #[tracing::instrument(skip(self), fields(db.table = "checklists", db.operation = "select", db.record_id = %id))]
    pub async fn get_with_items(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<(Checklist, Vec<ChecklistItem>)>, AppError> {
        let query = format!(
            "SELECT {} FROM checklists c WHERE c.id = $1 AND {}",
            CHECKLIST_COLUMNS,
            scope.qualified_predicate("c", 2)
        );

        let mut q = sqlx::query_as::<_, Checklist>(&query)
            .bind(id)
            .bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }
        let Some(checklist) = q.fetch_optional(&self.pool).await? else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, ChecklistItemRow>(&format!(
            "SELECT {} FROM checklist_items WHERE checklist_id = $1 ORDER BY position",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some((
            checklist,
            items.into_iter().map(ChecklistItemRow::into_item).collect(),
        )))
    }

    /// Checklists of one project with their item states.
    #[tracing::instrument(skip(self), fields(db.table = "checklists", db.operation = "select"))]
    pub async fn list_for_project(
        &self,
        scope: &AccessScope,
        project_id: Uuid,
    ) -> Result<Vec<ChecklistListEntry>, AppError> {
        let query = format!(
            "SELECT {}, NULL::text AS project_name \
             FROM checklists c WHERE c.project_id = $1 AND {} ORDER BY c.created_at DESC",
            CHECKLIST_COLUMNS,
            scope.qualified_predicate("c", 2)
        );

        let mut q = sqlx::query_as::<_, ChecklistJoinRow>(&query)
            .bind(project_id)
            .bind(scope.org_id);
        if let Some(user_id) = scope.creator_filter() {
            q = q.bind(user_id);
        }
        let rows = q.fetch_all(&self.pool).await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.checklist.id).collect();
        let mut states_by_checklist = self.item_states_batch(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let states = states_by_checklist
                    .remove(&row.checklist.id)
                    .unwrap_or_default();
                ChecklistListEntry {
                    checklist: row.checklist,
                    project_name: row.project_name,
                    states,
                }
            })
            .collect())
    }

    /// Insert a checklist and its initial items in one transaction. Items
    /// start as `todo` in the given order.
    #[tracing::instrument(skip(self, item_texts), fields(db.table = "checklists", db.operation = "insert"))]
    pub async fn create(
        &self,
        name: &str,
        project_id: Uuid,
        org_id: Uuid,
        created_by: Uuid,
        item_texts: &[String],
    ) -> Result<Uuid, AppError> {
        let mut tx = self.pool.begin().await?;

        let checklist_id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            "INSERT INTO checklists (id, name, project_id, org_id, created_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(checklist_id)
        .bind(name)
        .bind(project_id)
        .bind(org_id)
        .bind(created_by)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        for (position, text) in item_texts.iter().enumerate() {
            sqlx::query(
                "INSERT INTO checklist_items (id, checklist_id, text, state, position) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::new_v4())
            .bind(checklist_id)
            .bind(text)
            .bind(ItemState::Todo.as_str())
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(checklist_id)
    }
}
