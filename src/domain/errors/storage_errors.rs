use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors that can occur during object storage operations
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Nothing stored at the key
    ObjectNotFound { bucket: BucketName, key: ObjectKey },

    /// Bucket is not registered with the store
    BucketNotFound { bucket: BucketName },

    /// Access denied
    AccessDenied { key: ObjectKey, operation: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            StorageError::BucketNotFound { bucket } => {
                write!(f, "Bucket not found: {}", bucket)
            }
            StorageError::AccessDenied { key, operation } => {
                write!(
                    f,
                    "Access denied for operation '{}' on object: {}",
                    operation, key
                )
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::ObjectNotFound { .. })
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
