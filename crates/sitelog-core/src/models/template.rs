//! Organization-scoped catalog records: labels, album pages, checklist
//! templates, and project documents. Plain records with no derived logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Label applied to photos within a project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub org_id: Uuid,
    pub project_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Album page grouping photos for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct AlbumPage {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub org_id: Uuid,
    pub project_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Reusable checklist template: an ordered list of item texts.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ChecklistTemplateRow {
    pub id: Uuid,
    pub name: String,
    pub org_id: Uuid,
    pub items: Option<Vec<String>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ChecklistTemplateRow {
    pub fn into_template(self) -> ChecklistTemplate {
        ChecklistTemplate {
            id: self.id,
            name: self.name,
            org_id: self.org_id,
            items: self.items.unwrap_or_default(),
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChecklistTemplate {
    pub id: Uuid,
    pub name: String,
    pub org_id: Uuid,
    pub items: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Document attached to a project (stored object reference only).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ProjectDocument {
    pub id: Uuid,
    pub title: String,
    pub object_key: String,
    pub org_id: Uuid,
    pub project_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/admin/templates/labels` and `/pages`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCatalogEntryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
}

/// Body of `POST /api/admin/templates/checklists`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateChecklistTemplateRequest {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateCatalogEntryResponse {
    pub success: bool,
    pub id: Uuid,
}
