use crate::domain::{
    errors::StorageError,
    value_objects::{BucketName, ObjectKey},
};

/// Convert an `object_store` failure on `bucket`/`key` into a domain storage error.
///
/// The original error text is kept in `source` for diagnostics.
pub fn map_object_store_error(
    bucket: &BucketName,
    key: &ObjectKey,
    operation: &str,
    err: object_store::Error,
) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::ObjectNotFound {
            bucket: bucket.clone(),
            key: key.clone(),
        },
        object_store::Error::PermissionDenied { .. }
        | object_store::Error::Unauthenticated { .. } => StorageError::AccessDenied {
            key: key.clone(),
            operation: operation.to_string(),
        },
        other => StorageError::InfrastructureError {
            message: format!("Failed to {} {}/{}", operation, bucket, key),
            source: Some(other.to_string()),
        },
    }
}
