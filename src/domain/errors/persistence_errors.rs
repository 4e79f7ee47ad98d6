/// Errors raised by customer repository backends
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// The database rejected a write because of a schema constraint
    /// (for example the unique index on `email`)
    ConstraintViolation { message: String },

    /// A stored row could not be mapped back into a customer
    CorruptRow { message: String },

    /// Connection, query or driver failure
    Database {
        operation: String,
        message: String,
    },
}

impl PersistenceError {
    pub fn database(operation: &str, message: impl std::fmt::Display) -> Self {
        PersistenceError::Database {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::ConstraintViolation { message } => {
                write!(f, "Constraint violation: {}", message)
            }
            PersistenceError::CorruptRow { message } => {
                write!(f, "Corrupt customer row: {}", message)
            }
            PersistenceError::Database { operation, message } => {
                write!(f, "Database error while {}: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Result type for repository operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
