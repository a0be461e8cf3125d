//! View-model aggregation.
//!
//! Pure functions over rows already fetched from the database: checklist
//! completion, upload-status histograms, and per-project photo counts. All of
//! them return zero-value aggregates on empty input.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ItemState, Photo};

/// Completion summary for one checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChecklistSummary {
    pub total: usize,
    pub done: usize,
    /// Rounded percentage in [0, 100]; 0 for an empty checklist.
    pub progress: u8,
    pub is_finished: bool,
}

impl ChecklistSummary {
    pub fn from_states(states: &[ItemState]) -> Self {
        let total = states.len();
        let done = states.iter().filter(|s| s.is_complete()).count();
        let progress = if total == 0 {
            0
        } else {
            ((done as f64 / total as f64) * 100.0).round() as u8
        };
        ChecklistSummary {
            total,
            done,
            progress,
            is_finished: total > 0 && done == total,
        }
    }
}

/// Histogram of normalized photo statuses. BTreeMap keeps the rendered order
/// stable across requests.
pub fn upload_status_summary(photos: &[Photo]) -> BTreeMap<String, usize> {
    let mut summary = BTreeMap::new();
    for photo in photos {
        *summary.entry(photo.status_key()).or_insert(0) += 1;
    }
    summary
}

/// Photo counts partitioned by project, with unassigned photos in their own
/// bucket. Every photo lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PhotoCounts {
    pub by_project: HashMap<Uuid, usize>,
    pub unassigned: usize,
}

impl PhotoCounts {
    pub fn total(&self) -> usize {
        self.by_project.values().sum::<usize>() + self.unassigned
    }

    pub fn for_project(&self, project_id: Uuid) -> usize {
        self.by_project.get(&project_id).copied().unwrap_or(0)
    }
}

pub fn count_photos_by_project(photos: &[Photo]) -> PhotoCounts {
    let mut counts = PhotoCounts::default();
    for photo in photos {
        match photo.project_id {
            Some(project_id) => *counts.by_project.entry(project_id).or_insert(0) += 1,
            None => counts.unassigned += 1,
        }
    }
    counts
}

/// Restrict a photo collection to the projects a non-elevated caller can see.
/// Elevated callers pass through unchanged. `include_unassigned` differs per
/// page: the photo gallery shows unassigned photos, the projects overview
/// does not.
pub fn restrict_to_projects(
    photos: Vec<Photo>,
    elevated: bool,
    project_ids: &HashSet<Uuid>,
    include_unassigned: bool,
) -> Vec<Photo> {
    if elevated {
        return photos;
    }
    photos
        .into_iter()
        .filter(|photo| match photo.project_id {
            Some(project_id) => project_ids.contains(&project_id),
            None => include_unassigned,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn photo(project_id: Option<Uuid>, upload_status: Option<&str>) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            name: None,
            url: None,
            object_key: None,
            org_id: Uuid::new_v4(),
            project_id,
            created_by: None,
            tags: vec![],
            notes: None,
            upload_status: upload_status.map(String::from),
            status: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_checklist_summary_mixed_states() {
        let states = [
            ItemState::Done,
            ItemState::Done,
            ItemState::NotApplicable,
            ItemState::Todo,
        ];
        let summary = ChecklistSummary::from_states(&states);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.done, 3);
        assert_eq!(summary.progress, 75);
        assert!(!summary.is_finished);
    }

    #[test]
    fn test_checklist_summary_empty() {
        let summary = ChecklistSummary::from_states(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.done, 0);
        assert_eq!(summary.progress, 0);
        assert!(!summary.is_finished);
    }

    #[test]
    fn test_checklist_summary_finished() {
        let states = [ItemState::Done, ItemState::NotApplicable];
        let summary = ChecklistSummary::from_states(&states);
        assert_eq!(summary.progress, 100);
        assert!(summary.is_finished);
    }

    #[test]
    fn test_progress_rounds_and_stays_in_range() {
        let states = [ItemState::Done, ItemState::Todo, ItemState::Todo];
        let summary = ChecklistSummary::from_states(&states);
        assert_eq!(summary.progress, 33);

        let states = [ItemState::Done, ItemState::Done, ItemState::Todo];
        let summary = ChecklistSummary::from_states(&states);
        assert_eq!(summary.progress, 67);
        assert!(summary.progress <= 100);
    }

    #[test]
    fn test_status_summary_accounts_for_every_photo() {
        let photos = vec![
            photo(None, Some("Pending")),
            photo(None, Some("pending")),
            photo(None, Some("complete")),
            photo(None, None),
        ];
        let summary = upload_status_summary(&photos);
        assert_eq!(summary.get("pending"), Some(&2));
        assert_eq!(summary.get("complete"), Some(&1));
        assert_eq!(summary.get("unknown"), Some(&1));
        assert_eq!(summary.values().sum::<usize>(), photos.len());
    }

    #[test]
    fn test_photo_counts_partition_exactly() {
        let project_a = Uuid::new_v4();
        let project_b = Uuid::new_v4();
        let photos = vec![
            photo(Some(project_a), None),
            photo(Some(project_a), None),
            photo(Some(project_b), None),
            photo(None, None),
        ];
        let counts = count_photos_by_project(&photos);
        assert_eq!(counts.for_project(project_a), 2);
        assert_eq!(counts.for_project(project_b), 1);
        assert_eq!(counts.unassigned, 1);
        assert_eq!(counts.total(), photos.len());
    }

    #[test]
    fn test_photo_counts_empty_input() {
        let counts = count_photos_by_project(&[]);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.unassigned, 0);
    }

    #[test]
    fn test_restrict_passes_elevated_through() {
        let photos = vec![photo(Some(Uuid::new_v4()), None), photo(None, None)];
        let visible = restrict_to_projects(photos.clone(), true, &HashSet::new(), false);
        assert_eq!(visible.len(), photos.len());
    }

    #[test]
    fn test_restrict_filters_foreign_projects() {
        let mine = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let photos = vec![
            photo(Some(mine), None),
            photo(Some(theirs), None),
            photo(None, None),
        ];
        let own: HashSet<Uuid> = [mine].into_iter().collect();

        let gallery = restrict_to_projects(photos.clone(), false, &own, true);
        assert_eq!(gallery.len(), 2);

        let overview = restrict_to_projects(photos, false, &own, false);
        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].project_id, Some(mine));
    }
}
