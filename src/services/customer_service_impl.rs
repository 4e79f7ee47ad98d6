use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    domain::{
        errors::{CustomerError, CustomerResult, PersistenceError},
        models::{
            Customer, CustomerFilter, CustomerRegistrationRequest, CustomerUpdateRequest,
            CustomerView, NewCustomer,
        },
        value_objects::{BucketName, CustomerId, ObjectKey, ProfileImageId},
    },
    ports::{
        repositories::CustomerRepository, security::PasswordEncoder, services::CustomerService,
        storage::ObjectStore,
    },
};

/// Bucket names resolved per entity type
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets {
    pub customer: BucketName,
}

/// Implementation of CustomerService over one repository and one object store
#[derive(Clone)]
pub struct CustomerServiceImpl {
    repository: Arc<dyn CustomerRepository>,
    store: Arc<dyn ObjectStore>,
    password_encoder: Arc<dyn PasswordEncoder>,
    buckets: Buckets,
}

impl CustomerServiceImpl {
    pub fn new(
        repository: Arc<dyn CustomerRepository>,
        store: Arc<dyn ObjectStore>,
        password_encoder: Arc<dyn PasswordEncoder>,
        buckets: Buckets,
    ) -> Self {
        Self {
            repository,
            store,
            password_encoder,
            buckets,
        }
    }

    async fn load(&self, id: CustomerId) -> CustomerResult<Customer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::CustomerNotFound { id })
    }

    async fn ensure_exists(&self, id: CustomerId) -> CustomerResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(CustomerError::CustomerNotFound { id });
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str) -> CustomerResult<()> {
        if self.repository.exists_by_email(email).await? {
            return Err(CustomerError::EmailTaken {
                email: email.to_string(),
            });
        }
        Ok(())
    }
}

/// A stored image id that cannot form an object key is a corrupt record
fn profile_image_key(id: CustomerId, image_id: &ProfileImageId) -> CustomerResult<ObjectKey> {
    ObjectKey::profile_image(id, image_id).map_err(|e| {
        CustomerError::Persistence(PersistenceError::CorruptRow {
            message: format!("customer {}: {}", id, e),
        })
    })
}

fn require_non_blank(field: &str, value: &str) -> CustomerResult<()> {
    if value.trim().is_empty() {
        return Err(CustomerError::InvalidRequest {
            message: format!("{} must not be blank", field),
        });
    }
    Ok(())
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    #[instrument(skip(self))]
    async fn list_customers(&self, filter: &CustomerFilter) -> CustomerResult<Vec<CustomerView>> {
        let customers = self.repository.list_all().await?;

        if filter.is_empty() {
            return Ok(customers.into_iter().map(CustomerView::from).collect());
        }

        Ok(customers
            .into_iter()
            .filter(|c| filter.matches(c))
            .map(CustomerView::from)
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_customer(&self, id: CustomerId) -> CustomerResult<CustomerView> {
        self.load(id).await.map(CustomerView::from)
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register_customer(
        &self,
        request: CustomerRegistrationRequest,
    ) -> CustomerResult<CustomerId> {
        require_non_blank("name", &request.name)?;
        require_non_blank("email", &request.email)?;

        // Not atomic with the insert; the unique index on email closes the race.
        self.ensure_email_free(&request.email).await?;

        let password = self
            .password_encoder
            .encode(&request.password)
            .map_err(|e| CustomerError::PasswordEncoding { message: e.0 })?;

        let customer = NewCustomer {
            name: request.name,
            email: request.email,
            password,
            age: request.age,
            gender: request.gender,
        };

        let id = self.repository.insert(&customer).await?;
        info!(customer_id = %id, "customer registered");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete_customer(&self, id: CustomerId) -> CustomerResult<()> {
        self.ensure_exists(id).await?;
        self.repository.delete_by_id(id).await?;
        info!(customer_id = %id, "customer deleted");
        Ok(())
    }

    #[instrument(skip(self, request))]
    async fn update_customer(
        &self,
        id: CustomerId,
        request: CustomerUpdateRequest,
    ) -> CustomerResult<()> {
        let current = self.load(id).await?;

        if let Some(name) = &request.name {
            require_non_blank("name", name)?;
        }

        let patch = request.diff(&current);

        if let Some(email) = &patch.email {
            require_non_blank("email", email)?;
            self.ensure_email_free(email).await?;
        }

        if patch.is_empty() {
            debug!(customer_id = %id, "update request carries no changes");
            return Err(CustomerError::NoChanges);
        }

        self.repository.update(&patch).await?;
        info!(customer_id = %id, fields = ?patch.changed_fields(), "customer updated");
        Ok(())
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload_profile_image(
        &self,
        id: CustomerId,
        data: Vec<u8>,
    ) -> CustomerResult<ProfileImageId> {
        self.ensure_exists(id).await?;

        let image_id = ProfileImageId::generate();
        let key = profile_image_key(id, &image_id)?;

        // Blob first, then the reference: a failure in between can orphan a
        // blob but never leave the record pointing at nothing.
        self.store
            .put_object(&self.buckets.customer, &key, data)
            .await
            .map_err(|source| {
                warn!(customer_id = %id, key = %key, error = %source, "profile image upload failed");
                CustomerError::UploadFailed { source }
            })?;

        self.repository
            .update_profile_image_id(id, &image_id)
            .await?;

        info!(customer_id = %id, profile_image_id = %image_id, "profile image uploaded");
        Ok(image_id)
    }

    #[instrument(skip(self))]
    async fn download_profile_image(&self, id: CustomerId) -> CustomerResult<Vec<u8>> {
        let customer = self.load(id).await?;

        let image_id = customer
            .profile_image_id
            .ok_or(CustomerError::ProfileImageNotFound { id })?;
        let key = profile_image_key(id, &image_id)?;

        self.store
            .get_object(&self.buckets.customer, &key)
            .await
            .map_err(|source| {
                if source.is_not_found() {
                    warn!(customer_id = %id, key = %key, "profile image recorded but blob missing");
                    CustomerError::ProfileImageNotFound { id }
                } else {
                    CustomerError::DownloadFailed { source }
                }
            })
    }
}

/// Builder for CustomerServiceImpl
#[derive(Default)]
pub struct CustomerServiceBuilder {
    repository: Option<Arc<dyn CustomerRepository>>,
    store: Option<Arc<dyn ObjectStore>>,
    password_encoder: Option<Arc<dyn PasswordEncoder>>,
    buckets: Option<Buckets>,
}

impl CustomerServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn CustomerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn password_encoder(mut self, encoder: Arc<dyn PasswordEncoder>) -> Self {
        self.password_encoder = Some(encoder);
        self
    }

    pub fn buckets(mut self, buckets: Buckets) -> Self {
        self.buckets = Some(buckets);
        self
    }

    pub fn build(self) -> Result<CustomerServiceImpl, &'static str> {
        let repository = self.repository.ok_or("Repository is required")?;
        let store = self.store.ok_or("Store is required")?;
        let password_encoder = self.password_encoder.ok_or("Password encoder is required")?;
        let buckets = self.buckets.ok_or("Buckets are required")?;

        Ok(CustomerServiceImpl::new(
            repository,
            store,
            password_encoder,
            buckets,
        ))
    }
}
