use async_trait::async_trait;
use object_store::{
    memory::InMemory, path::Path as ObjectPath, ObjectStore as ApacheObjectStore, PutPayload,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::error::map_object_store_error;
use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};

/// Adapter that implements our ObjectStore port using Apache object_store.
///
/// An `object_store` backend is bound to a single bucket, so the adapter
/// keeps one backend per registered bucket name.
#[derive(Clone, Default)]
pub struct ApacheObjectStoreAdapter {
    buckets: HashMap<BucketName, Arc<dyn ApacheObjectStore>>,
}

impl ApacheObjectStoreAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the backend serving `bucket`
    pub fn with_bucket(mut self, bucket: BucketName, store: Arc<dyn ApacheObjectStore>) -> Self {
        self.buckets.insert(bucket, store);
        self
    }

    /// An adapter whose buckets all live in process memory
    pub fn in_memory<I>(buckets: I) -> Self
    where
        I: IntoIterator<Item = BucketName>,
    {
        buckets.into_iter().fold(Self::new(), |adapter, bucket| {
            adapter.with_bucket(bucket, Arc::new(InMemory::new()))
        })
    }

    fn backend(&self, bucket: &BucketName) -> StorageResult<&Arc<dyn ApacheObjectStore>> {
        self.buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound {
                bucket: bucket.clone(),
            })
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        data: Vec<u8>,
    ) -> StorageResult<()> {
        let backend = self.backend(bucket)?;
        let path = ObjectPath::from(key.as_str());
        let size = data.len();

        backend
            .put(&path, PutPayload::from(data))
            .await
            .map_err(|e| map_object_store_error(bucket, key, "put", e))?;

        debug!(bucket = %bucket, key = %key, size, "object stored");
        Ok(())
    }

    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        let backend = self.backend(bucket)?;
        let path = ObjectPath::from(key.as_str());

        let result = backend
            .get(&path)
            .await
            .map_err(|e| map_object_store_error(bucket, key, "get", e))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| map_object_store_error(bucket, key, "read", e))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> BucketName {
        BucketName::new("customers").unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let adapter = ApacheObjectStoreAdapter::in_memory([customers()]);
        let key = ObjectKey::new("profile-images/1/a").unwrap();

        adapter
            .put_object(&customers(), &key, b"first".to_vec())
            .await
            .unwrap();
        adapter
            .put_object(&customers(), &key, b"second".to_vec())
            .await
            .unwrap();

        let data = adapter.get_object(&customers(), &key).await.unwrap();
        assert_eq!(data, b"second");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let adapter = ApacheObjectStoreAdapter::in_memory([customers()]);
        let key = ObjectKey::new("profile-images/1/missing").unwrap();

        let err = adapter.get_object(&customers(), &key).await.unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_unknown_bucket() {
        let adapter = ApacheObjectStoreAdapter::in_memory([customers()]);
        let other = BucketName::new("invoices").unwrap();
        let key = ObjectKey::new("a").unwrap();

        let err = adapter
            .put_object(&other, &key, vec![1, 2, 3])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::BucketNotFound { bucket } if bucket == other));
    }
}
