//! Sitelog Database Library
//!
//! Repositories for the data access layer. Every list read takes an
//! [`AccessScope`](sitelog_core::AccessScope) so the organization and
//! ownership predicates are applied by construction, not per call site.

pub mod db;

pub use db::{
    CatalogRepository, ChecklistListEntry, ChecklistRepository, GroupRepository, PhotoListEntry,
    PhotoRepository, ProfileRepository, ProjectRepository, ReportRepository,
};
