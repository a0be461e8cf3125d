//! Sitelog Storage Library
//!
//! Object storage abstraction for photo and document blobs. The product never
//! serves private objects directly: pages hand out short-lived signed URLs
//! issued by the backend, and a signing failure for one object must degrade
//! only that object's preview.
//!
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod local;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
