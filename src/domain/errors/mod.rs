mod customer_errors;
mod persistence_errors;
mod storage_errors;
mod validation_errors;

pub use customer_errors::*;
pub use persistence_errors::*;
pub use storage_errors::*;
pub use validation_errors::*;
