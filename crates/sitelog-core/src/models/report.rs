use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Draft,
    Published,
    Archived,
}

impl ReportStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ReportStatus::Draft),
            "published" => Some(ReportStatus::Published),
            "archived" => Some(ReportStatus::Archived),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Published => "published",
            ReportStatus::Archived => "archived",
        }
    }
}

/// Report row; `status` stored as text, `pdf_object_key` populated only once
/// a PDF has been rendered (rendering itself lives outside this service).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ReportRow {
    pub id: Uuid,
    pub title: String,
    pub project_id: Uuid,
    pub org_id: Uuid,
    pub status: String,
    pub pdf_object_key: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ReportRow {
    pub fn into_report(self) -> Report {
        let status = ReportStatus::parse(&self.status).unwrap_or(ReportStatus::Draft);
        Report {
            id: self.id,
            title: self.title,
            project_id: self.project_id,
            org_id: self.org_id,
            status,
            pdf_object_key: self.pdf_object_key,
            created_by: self.created_by,
            created_at: self.created_at,
            published_at: self.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub project_id: Uuid,
    pub org_id: Uuid,
    pub status: ReportStatus,
    pub pdf_object_key: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/admin/reports`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    pub title: String,
    pub project_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReportResponse {
    pub success: bool,
    pub report_id: Uuid,
}
