mod customer_entity;
mod in_memory_customer_repository;
mod orm_customer_repository;
mod schema;
mod sql_customer_repository;

pub use in_memory_customer_repository::InMemoryCustomerRepository;
pub use orm_customer_repository::OrmCustomerRepository;
pub use schema::SqlDialect;
pub use sql_customer_repository::SqlCustomerRepository;
