//! Signed-URL resolution for photo collections.
//!
//! Every photo preview goes through a short-lived signed URL. The calls are
//! issued concurrently and joined; a failure for one photo degrades that
//! photo's preview to `None` and never fails the page.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use sitelog_core::constants::SIGNED_URL_TTL_SECS;
use sitelog_core::models::PhotoView;
use sitelog_db::PhotoListEntry;
use sitelog_storage::Storage;

/// Resolve one object key; logs and degrades to None on failure.
async fn sign(storage: &Arc<dyn Storage>, photo_id: uuid::Uuid, object_key: &str) -> Option<String> {
    match storage
        .signed_url(object_key, Duration::from_secs(SIGNED_URL_TTL_SECS))
        .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(error = %e, photo_id = %photo_id, "Failed to generate signed URL");
            None
        }
    }
}

/// Build photo view models, resolving signed URLs concurrently.
pub async fn resolve_photo_views(
    storage: &Arc<dyn Storage>,
    entries: Vec<PhotoListEntry>,
) -> Vec<PhotoView> {
    join_all(entries.into_iter().map(|entry| async move {
        let photo = entry.photo;
        let signed_url = match photo.object_key.as_deref() {
            Some(key) => sign(storage, photo.id, key).await,
            None => None,
        };
        PhotoView {
            id: photo.id,
            name: photo.name,
            project_id: photo.project_id,
            project_name: entry.project_name,
            tags: photo.tags,
            notes: photo.notes,
            upload_status: photo.upload_status,
            created_at: photo.created_at,
            signed_url,
        }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use sitelog_core::models::Photo;
    use sitelog_core::StorageBackend;
    use sitelog_storage::{StorageError, StorageResult};
    use uuid::Uuid;

    /// Storage stub that fails signing for keys containing "broken".
    struct FlakyStorage;

    #[async_trait]
    impl Storage for FlakyStorage {
        async fn upload(
            &self,
            _storage_key: &str,
            _data: Vec<u8>,
            _content_type: &str,
        ) -> StorageResult<String> {
            unimplemented!("not used in these tests")
        }

        async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
            Ok(())
        }

        async fn signed_url(
            &self,
            storage_key: &str,
            _expires_in: Duration,
        ) -> StorageResult<String> {
            if storage_key.contains("broken") {
                Err(StorageError::BackendError("signing failed".to_string()))
            } else {
                Ok(format!("https://signed.example/{}", storage_key))
            }
        }

        async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
            Ok(true)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    fn entry(object_key: Option<&str>) -> PhotoListEntry {
        PhotoListEntry {
            photo: Photo {
                id: Uuid::new_v4(),
                name: None,
                url: None,
                object_key: object_key.map(String::from),
                org_id: Uuid::new_v4(),
                project_id: None,
                created_by: None,
                tags: vec![],
                notes: None,
                upload_status: None,
                status: None,
                created_at: Utc::now(),
            },
            project_name: None,
        }
    }

    #[tokio::test]
    async fn test_one_failure_degrades_only_that_photo() {
        let storage: Arc<dyn Storage> = Arc::new(FlakyStorage);
        let views = resolve_photo_views(
            &storage,
            vec![entry(Some("a.jpg")), entry(Some("broken.jpg")), entry(Some("c.jpg"))],
        )
        .await;

        assert_eq!(views.len(), 3);
        assert_eq!(
            views[0].signed_url.as_deref(),
            Some("https://signed.example/a.jpg")
        );
        assert_eq!(views[1].signed_url, None);
        assert_eq!(
            views[2].signed_url.as_deref(),
            Some("https://signed.example/c.jpg")
        );
    }

    #[tokio::test]
    async fn test_missing_object_key_skips_storage_call() {
        let storage: Arc<dyn Storage> = Arc::new(FlakyStorage);
        let views = resolve_photo_views(&storage, vec![entry(None)]).await;
        assert_eq!(views[0].signed_url, None);
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let storage: Arc<dyn Storage> = Arc::new(FlakyStorage);
        let views = resolve_photo_views(&storage, vec![]).await;
        assert!(views.is_empty());
    }
}
