pub mod customer_handlers;

pub use customer_handlers::*;
