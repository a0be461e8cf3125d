//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Row types (`*Row`) mirror the database layout and are
//! converted into the clean domain models consumed by handlers.

mod checklist;
mod group;
mod photo;
mod profile;
mod project;
mod report;
mod template;

// Re-export all models for convenient imports
pub use checklist::*;
pub use group::*;
pub use photo::*;
pub use profile::*;
pub use project::*;
pub use report::*;
pub use template::*;
