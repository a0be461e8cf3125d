//! Sitelog API
//!
//! The admin console backend: session resolution, scoped reads, view-model
//! building, and the narrow JSON mutation routes.

pub mod api_doc;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
