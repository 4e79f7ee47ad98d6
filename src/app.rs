use std::sync::Arc;
use tracing::info;

use crate::{
    adapters::outbound::{
        persistence::{InMemoryCustomerRepository, OrmCustomerRepository, SqlCustomerRepository},
        security::Argon2PasswordEncoder,
        storage::{create_s3_store, ApacheObjectStoreAdapter, S3Config},
    },
    domain::value_objects::BucketName,
    ports::{repositories::CustomerRepository, security::PasswordEncoder, storage::ObjectStore},
    services::{Buckets, CustomerServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    pub buckets: Buckets,
}

impl AppConfig {
    pub fn with_customer_bucket(bucket: BucketName) -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            buckets: Buckets { customer: bucket },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_customer_bucket(BucketName::default_customer())
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3(S3Config),
}

/// Repository backend configuration
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    /// Hand-written SQL through sqlx
    Sql { url: String, max_connections: u32 },
    /// Entity mapping through sea-orm
    Orm { url: String, max_connections: u32 },
}

impl RepositoryBackend {
    pub fn name(&self) -> &'static str {
        match self {
            RepositoryBackend::InMemory => "memory",
            RepositoryBackend::Sql { .. } => "sql",
            RepositoryBackend::Orm { .. } => "orm",
        }
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub customer_repository: Arc<dyn CustomerRepository>,
    pub object_store: Arc<dyn ObjectStore>,
    pub password_encoder: Arc<dyn PasswordEncoder>,
}

/// Application services container
pub struct AppServices {
    pub customer_service: CustomerServiceImpl,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    pub fn with_buckets(mut self, buckets: Buckets) -> Self {
        self.config.buckets = buckets;
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(&self) -> Result<AppDependencies, AppError> {
        let object_store = self.create_object_store()?;
        let customer_repository = self.create_repository().await?;

        Ok(AppDependencies {
            customer_repository,
            object_store,
            password_encoder: Arc::new(Argon2PasswordEncoder::new()),
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let customer_service = CustomerServiceImpl::new(
            deps.customer_repository,
            deps.object_store,
            deps.password_encoder,
            self.config.buckets.clone(),
        );

        Ok(AppServices { customer_service })
    }

    fn create_object_store(&self) -> Result<Arc<dyn ObjectStore>, AppError> {
        let bucket = self.config.buckets.customer.clone();

        match &self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(ApacheObjectStoreAdapter::in_memory([bucket]))),
            StorageBackend::S3(s3) => {
                let backend =
                    create_s3_store(s3, &bucket).map_err(|e| AppError::StorageInit {
                        message: format!("{:#}", e),
                    })?;
                info!(bucket = %bucket, endpoint = ?s3.endpoint, "S3 storage configured");
                Ok(Arc::new(
                    ApacheObjectStoreAdapter::new().with_bucket(bucket, backend),
                ))
            }
        }
    }

    async fn create_repository(&self) -> Result<Arc<dyn CustomerRepository>, AppError> {
        let backend = &self.config.repository_backend;

        if let RepositoryBackend::Sql { url, .. } | RepositoryBackend::Orm { url, .. } = backend {
            if url.trim().is_empty() {
                return Err(AppError::Configuration {
                    message: format!("{} backend requires a database URL", backend.name()),
                });
            }
        }

        let init_error = |e: &dyn std::fmt::Display| AppError::RepositoryInit {
            message: format!("{} backend: {}", backend.name(), e),
        };

        match backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryCustomerRepository::new())),
            RepositoryBackend::Sql {
                url,
                max_connections,
            } => {
                let repo = SqlCustomerRepository::connect(url, *max_connections)
                    .await
                    .map_err(|e| init_error(&e))?;
                repo.migrate().await.map_err(|e| init_error(&e))?;
                info!("SQL customer repository ready");
                Ok(Arc::new(repo))
            }
            RepositoryBackend::Orm {
                url,
                max_connections,
            } => {
                let repo = OrmCustomerRepository::connect(url, *max_connections)
                    .await
                    .map_err(|e| init_error(&e))?;
                repo.migrate().await.map_err(|e| init_error(&e))?;
                info!("ORM customer repository ready");
                Ok(Arc::new(repo))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}
