use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Photo row as stored. `upload_status` and `status` coexist historically;
/// the histogram normalization picks the first non-empty of the two.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct PhotoRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub url: Option<String>,
    pub object_key: Option<String>,
    pub org_id: Uuid,
    pub project_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub upload_status: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PhotoRow {
    pub fn into_photo(self) -> Photo {
        Photo {
            id: self.id,
            name: self.name,
            url: self.url,
            object_key: self.object_key,
            org_id: self.org_id,
            project_id: self.project_id,
            created_by: self.created_by,
            tags: self.tags.unwrap_or_default(),
            notes: self.notes,
            upload_status: self.upload_status,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Photo entity. A photo with no `project_id` is "unassigned".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Photo {
    pub id: Uuid,
    pub name: Option<String>,
    pub url: Option<String>,
    pub object_key: Option<String>,
    pub org_id: Uuid,
    pub project_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub upload_status: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// Normalized histogram key: first non-empty of upload_status, status,
    /// else "unknown", lowercased.
    pub fn status_key(&self) -> String {
        self.upload_status
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.status.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("unknown")
            .to_lowercase()
    }
}

/// Photo entry on the photos/projects pages. `signed_url` is derived per
/// request from `object_key` and never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoView {
    pub id: Uuid,
    pub name: Option<String>,
    pub project_id: Option<Uuid>,
    pub project_name: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub upload_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub signed_url: Option<String>,
}

/// Body of `PATCH /api/admin/photos/{id}`.
///
/// `tags` accepts either a list or a comma-separated string.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePhotoRequest {
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl TagsInput {
    /// Normalize to a trimmed, non-empty tag list.
    pub fn normalize(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            TagsInput::List(items) => items.iter().map(String::as_str).collect(),
            TagsInput::Csv(s) => s.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Normalize free-text notes: trimmed, empty collapses to None.
pub fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(upload_status: Option<&str>, status: Option<&str>) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            name: None,
            url: None,
            object_key: None,
            org_id: Uuid::new_v4(),
            project_id: None,
            created_by: None,
            tags: vec![],
            notes: None,
            upload_status: upload_status.map(String::from),
            status: status.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_key_prefers_upload_status() {
        assert_eq!(photo(Some("Pending"), Some("done")).status_key(), "pending");
    }

    #[test]
    fn test_status_key_falls_back_to_status_then_unknown() {
        assert_eq!(photo(None, Some("Done")).status_key(), "done");
        assert_eq!(photo(Some(""), Some("")).status_key(), "unknown");
        assert_eq!(photo(None, None).status_key(), "unknown");
    }

    #[test]
    fn test_tags_normalize_from_csv() {
        let tags = TagsInput::Csv("a, ,b,".to_string()).normalize();
        assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_tags_normalize_from_list() {
        let tags = TagsInput::List(vec!["a".into(), " ".into(), " b ".into()]).normalize();
        assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_normalize_notes() {
        assert_eq!(normalize_notes(Some("  hi  ")), Some("hi".to_string()));
        assert_eq!(normalize_notes(Some("   ")), None);
        assert_eq!(normalize_notes(None), None);
    }
}
