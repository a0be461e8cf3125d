//! Sitelog Core Library
//!
//! This crate provides the domain models, error types, configuration, access
//! scoping, and view-model aggregation shared across all Sitelog components.
//!
//! The `Database` error variant and row types are gated behind the `sqlx`
//! feature so consumers that never touch the database can build without it.

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod scope;
pub mod summary;

// Re-export commonly used types
pub use batch::{BatchOutcome, BatchReport};
pub use config::{Config, StorageBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use scope::AccessScope;
