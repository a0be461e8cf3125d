//! Request handlers, one module per resource.
//!
//! Page routes under `/admin/*` return authorized JSON view models; mutation
//! routes under `/api/admin/*` follow resolve → authorize → validate → single
//! write.

pub mod checklists;
pub mod groups;
pub mod health;
pub mod login;
pub mod overview;
pub mod photos;
pub mod placeholders;
pub mod projects;
pub mod reports;
pub mod templates;
pub mod users;
