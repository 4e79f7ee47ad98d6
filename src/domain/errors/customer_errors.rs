use crate::domain::{
    errors::{PersistenceError, StorageError},
    value_objects::CustomerId,
};

/// Coarse classification the boundary layer maps onto its own status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    StorageFailure,
    Internal,
}

/// Errors returned by the customer service
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("customer with id [{id}] not found")]
    CustomerNotFound { id: CustomerId },

    #[error("customer with id [{id}] profile image not found")]
    ProfileImageNotFound { id: CustomerId },

    #[error("Email already taken")]
    EmailTaken { email: String },

    #[error("no data changes found")]
    NoChanges,

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("failed to upload profile image")]
    UploadFailed {
        #[source]
        source: StorageError,
    },

    #[error("failed to download profile image")]
    DownloadFailed {
        #[source]
        source: StorageError,
    },

    #[error("failed to encode password: {message}")]
    PasswordEncoding { message: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl CustomerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustomerError::CustomerNotFound { .. } | CustomerError::ProfileImageNotFound { .. } => {
                ErrorKind::NotFound
            }
            CustomerError::EmailTaken { .. }
            | CustomerError::Persistence(PersistenceError::ConstraintViolation { .. }) => {
                ErrorKind::Conflict
            }
            CustomerError::NoChanges | CustomerError::InvalidRequest { .. } => {
                ErrorKind::Validation
            }
            CustomerError::UploadFailed { .. } | CustomerError::DownloadFailed { .. } => {
                ErrorKind::StorageFailure
            }
            CustomerError::PasswordEncoding { .. } | CustomerError::Persistence(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type for customer service operations
pub type CustomerResult<T> = Result<T, CustomerError>;
