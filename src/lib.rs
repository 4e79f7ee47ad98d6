pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    // Models
    Customer,
    // Errors
    CustomerError,
    CustomerFilter,
    // Value objects
    CustomerId,
    CustomerPatch,
    CustomerRegistrationRequest,
    CustomerResult,
    CustomerUpdateRequest,
    CustomerView,
    ErrorKind,
    Gender,
    NewCustomer,
    ObjectKey,
    PersistenceError,
    ProfileImageId,
    StorageError,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{CustomerRepository, CustomerService, ObjectStore, PasswordEncoder};

// Service implementations - business logic
pub use services::{Buckets, CustomerServiceBuilder, CustomerServiceImpl};

// Application factory and configuration
pub use app::{
    create_in_memory_app, AppBuilder, AppConfig, AppDependencies, AppError, AppServices,
    RepositoryBackend, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    persistence::{InMemoryCustomerRepository, OrmCustomerRepository, SqlCustomerRepository},
    security::Argon2PasswordEncoder,
    storage::ApacheObjectStoreAdapter,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, ApacheObjectStoreAdapter, AppBuilder, AppServices, BucketName,
        CustomerError, CustomerId, CustomerRegistrationRequest, CustomerRepository,
        CustomerService, CustomerServiceImpl, CustomerUpdateRequest, CustomerView, Gender,
        InMemoryCustomerRepository, ObjectStore,
    };
}
