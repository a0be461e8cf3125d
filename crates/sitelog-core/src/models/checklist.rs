use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Checklist item state. "n/a" counts toward completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Todo,
    Doing,
    Done,
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl ItemState {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(ItemState::Todo),
            "doing" => Some(ItemState::Doing),
            "done" => Some(ItemState::Done),
            "n/a" => Some(ItemState::NotApplicable),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemState::Todo => "todo",
            ItemState::Doing => "doing",
            ItemState::Done => "done",
            ItemState::NotApplicable => "n/a",
        }
    }

    /// Done and not-applicable items both count as completed.
    pub fn is_complete(self) -> bool {
        matches!(self, ItemState::Done | ItemState::NotApplicable)
    }
}

/// Checklist entity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Checklist {
    pub id: Uuid,
    pub name: String,
    pub project_id: Uuid,
    pub org_id: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Checklist item row. `state` is stored as text.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ChecklistItemRow {
    pub id: Uuid,
    pub checklist_id: Uuid,
    pub text: String,
    pub state: String,
    pub position: i32,
}

impl ChecklistItemRow {
    /// Unknown state text degrades to `Todo` rather than failing the page.
    pub fn into_item(self) -> ChecklistItem {
        let state = ItemState::parse(&self.state).unwrap_or(ItemState::Todo);
        ChecklistItem {
            id: self.id,
            checklist_id: self.checklist_id,
            text: self.text,
            state,
            position: self.position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub checklist_id: Uuid,
    pub text: String,
    pub state: ItemState,
    pub position: i32,
}

/// Body of `POST /api/admin/checklists`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateChecklistRequest {
    pub name: String,
    pub project_id: Uuid,
    /// Optional template to copy items from, in order, as `todo`.
    #[serde(default)]
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateChecklistResponse {
    pub success: bool,
    pub checklist_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parse_round_trip() {
        for state in [
            ItemState::Todo,
            ItemState::Doing,
            ItemState::Done,
            ItemState::NotApplicable,
        ] {
            assert_eq!(ItemState::parse(state.as_str()), Some(state));
        }
        assert_eq!(ItemState::parse("blocked"), None);
    }

    #[test]
    fn test_na_counts_as_complete() {
        assert!(ItemState::Done.is_complete());
        assert!(ItemState::NotApplicable.is_complete());
        assert!(!ItemState::Todo.is_complete());
        assert!(!ItemState::Doing.is_complete());
    }

    #[test]
    fn test_serde_uses_slash_form_for_na() {
        let json = serde_json::to_string(&ItemState::NotApplicable).unwrap();
        assert_eq!(json, "\"n/a\"");
    }

    #[test]
    fn test_unknown_row_state_degrades_to_todo() {
        let row = ChecklistItemRow {
            id: Uuid::new_v4(),
            checklist_id: Uuid::new_v4(),
            text: "Pour footing".to_string(),
            state: "waiting".to_string(),
            position: 0,
        };
        assert_eq!(row.into_item().state, ItemState::Todo);
    }
}
