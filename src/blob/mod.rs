//! # Blob Storage
//!
//! Product images are uploaded to a [`BlobStore`] and products keep the returned URL.
//! [`MemoryBlobStore`] keeps objects in memory and hands out `memory://<path>` URLs.

use crate::error::ErrorKind;
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BlobError {
    #[error("Invalid blob path: {0}")]
    InvalidPath(String),

    #[error("Empty upload: {0}")]
    Empty(String),

    #[error("Blob already exists: {0}")]
    AlreadyExists(String),

    #[error("Blob store unavailable: {0}")]
    Unavailable(String),
}

impl BlobError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlobError::InvalidPath(_) | BlobError::Empty(_) | BlobError::AlreadyExists(_) => {
                ErrorKind::Validation
            }
            BlobError::Unavailable(_) => ErrorKind::BackendUnavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` at `path` and returns a URL for it. An existing object is never
    /// replaced; uploading to a taken path fails with [`BlobError::AlreadyExists`].
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError>;
}

/// Object path for a product image: `products/<millis>-<nonce>-<file name>`, with the
/// nonce as eight hex digits.
///
/// Only the last path segment of `file_name` is kept.
pub fn product_image_path(millis: i64, nonce: u32, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    format!("products/{millis}-{nonce:08x}-{base}")
}

#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, StoredBlob>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, path: &str) -> Option<StoredBlob> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        if path.is_empty() || path.ends_with('/') || path.split('/').any(|s| s == "..") {
            return Err(BlobError::InvalidPath(path.to_string()));
        }
        if bytes.is_empty() {
            return Err(BlobError::Empty(path.to_string()));
        }
        match self.objects.write().await.entry(path.to_string()) {
            Entry::Occupied(_) => return Err(BlobError::AlreadyExists(path.to_string())),
            Entry::Vacant(slot) => {
                debug!(path, size = bytes.len(), content_type, "Blob stored");
                slot.insert(StoredBlob {
                    content_type: content_type.to_string(),
                    bytes,
                });
            }
        }
        Ok(format!("memory://{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_paths_use_timestamp_nonce_and_base_name() {
        assert_eq!(
            product_image_path(1_700_000_000_000, 0xbeef, "C:\\photos\\tote.png"),
            "products/1700000000000-0000beef-tote.png"
        );
        assert_eq!(
            product_image_path(5, u32::MAX, "box.jpg"),
            "products/5-ffffffff-box.jpg"
        );
        assert_ne!(
            product_image_path(5, 1, "box.jpg"),
            product_image_path(5, 2, "box.jpg")
        );
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryBlobStore::new();
        let url = store
            .upload("products/1-box.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();
        assert_eq!(url, "memory://products/1-box.jpg");
        assert_eq!(store.get("products/1-box.jpg").await.unwrap().bytes, vec![1, 2, 3]);

        assert!(matches!(
            store.upload("products/../x", vec![1], "image/png").await,
            Err(BlobError::InvalidPath(_))
        ));
        assert!(matches!(
            store.upload("products/2-empty.png", vec![], "image/png").await,
            Err(BlobError::Empty(_))
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn taken_paths_are_never_overwritten() {
        let store = MemoryBlobStore::new();
        store
            .upload("products/1-00000001-box.jpg", vec![1], "image/jpeg")
            .await
            .unwrap();

        let err = store
            .upload("products/1-00000001-box.jpg", vec![9, 9], "image/png")
            .await
            .unwrap_err();
        assert_eq!(err, BlobError::AlreadyExists("products/1-00000001-box.jpg".into()));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let kept = store.get("products/1-00000001-box.jpg").await.unwrap();
        assert_eq!(kept.bytes, vec![1]);
        assert_eq!(kept.content_type, "image/jpeg");
    }
}
