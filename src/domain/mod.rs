pub mod errors;
pub mod models;
pub mod value_objects;

pub use errors::{
    CustomerError, CustomerResult, ErrorKind, PersistenceError, PersistenceResult, StorageError,
    StorageResult, ValidationError,
};
pub use models::*;
pub use value_objects::*;
