use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use sitelog_core::models::{Group, GroupView};
use sitelog_core::AppError;

#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Groups of an organization with member counts, newest first.
    #[tracing::instrument(skip(self), fields(db.table = "groups", db.operation = "select"))]
    pub async fn list_with_counts(&self, org_id: Uuid) -> Result<Vec<GroupView>, AppError> {
        let rows = sqlx::query_as::<_, (Uuid, String, chrono::DateTime<Utc>, i64)>(
            r#"
            SELECT
                g.id,
                g.name,
                g.created_at,
                COUNT(gm.user_id) AS member_count
            FROM groups g
            LEFT JOIN group_members gm ON gm.group_id = g.id
            WHERE g.org_id = $1
            GROUP BY g.id, g.name, g.created_at
            ORDER BY g.created_at DESC
            "#,
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, created_at, member_count)| GroupView {
                id,
                name,
                created_at,
                member_count,
            })
            .collect())
    }

    /// Insert a group row. Members are added separately, one by one, so a
    /// failing member insert leaves the group and the other members in place.
    #[tracing::instrument(skip(self), fields(db.table = "groups", db.operation = "insert"))]
    pub async fn create(
        &self,
        name: &str,
        org_id: Uuid,
        created_by: Uuid,
    ) -> Result<Group, AppError> {
        let group = Group {
            id: Uuid::new_v4(),
            name: name.to_string(),
            org_id,
            created_by,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO groups (id, name, org_id, created_by, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(group.org_id)
        .bind(group.created_by)
        .bind(group.created_at)
        .execute(&self.pool)
        .await?;

        Ok(group)
    }

    /// Add one member. Re-adding an existing member is a no-op, matching the
    /// upsert semantics of the console.
    #[tracing::instrument(skip(self), fields(db.table = "group_members", db.operation = "insert"))]
    pub async fn add_member(&self, group_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO group_members (group_id, user_id, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT (group_id, user_id) DO NOTHING",
        )
        .bind(group_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
