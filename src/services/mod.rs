mod customer_service_impl;

pub use customer_service_impl::{Buckets, CustomerServiceBuilder, CustomerServiceImpl};
