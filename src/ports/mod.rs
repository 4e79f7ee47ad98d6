pub mod repositories;
pub mod security;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use repositories::CustomerRepository;
pub use security::PasswordEncoder;
pub use services::CustomerService;
pub use storage::ObjectStore;
