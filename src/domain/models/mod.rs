pub mod customer;
pub mod filter;
pub mod requests;

pub use customer::*;
pub use filter::*;
pub use requests::*;
