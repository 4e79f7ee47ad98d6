use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult,
    value_objects::{BucketName, ObjectKey},
};

/// Port for blob storage.
/// This abstracts the actual storage backend (S3, MinIO, in-memory)
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Store object data, overwriting anything already at `key`
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        data: Vec<u8>,
    ) -> StorageResult<()>;

    /// Retrieve object data; `StorageError::ObjectNotFound` when nothing is stored at `key`
    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<Vec<u8>>;
}
