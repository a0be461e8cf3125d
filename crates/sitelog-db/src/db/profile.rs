use sqlx::PgPool;
use uuid::Uuid;

use sitelog_core::models::{Profile, ProfileRow};
use sitelog_core::AppError;

const PROFILE_COLUMNS: &str =
    "user_id, org_id, role, is_admin, is_active, first_name, last_name, created_at";

/// Profiles: the organization-scoped identity rows behind every caller.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the profile for an authenticated user. Every caller has at most
    /// one profile row.
    #[tracing::instrument(skip(self), fields(db.table = "profiles", db.operation = "select"))]
    pub async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    /// All profiles in an organization, newest first. Callers gate this on
    /// elevation; there is no ownership dimension for profiles.
    #[tracing::instrument(skip(self), fields(db.table = "profiles", db.operation = "select"))]
    pub async fn list_by_org(&self, org_id: Uuid) -> Result<Vec<Profile>, AppError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {} FROM profiles WHERE org_id = $1 ORDER BY created_at DESC",
            PROFILE_COLUMNS
        ))
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProfileRow::into_profile).collect())
    }
}
