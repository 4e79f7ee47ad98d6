use async_trait::async_trait;

use crate::domain::{
    errors::CustomerResult,
    models::{CustomerFilter, CustomerRegistrationRequest, CustomerUpdateRequest, CustomerView},
    value_objects::{CustomerId, ProfileImageId},
};

/// Port for customer management.
/// This trait defines the business operations exposed to the API layer
#[async_trait]
pub trait CustomerService: Send + Sync + 'static {
    /// List customers matching `filter`
    async fn list_customers(&self, filter: &CustomerFilter) -> CustomerResult<Vec<CustomerView>>;

    /// Get a single customer
    async fn get_customer(&self, id: CustomerId) -> CustomerResult<CustomerView>;

    /// Register a new customer, returning its id
    async fn register_customer(
        &self,
        request: CustomerRegistrationRequest,
    ) -> CustomerResult<CustomerId>;

    /// Delete a customer
    async fn delete_customer(&self, id: CustomerId) -> CustomerResult<()>;

    /// Apply a sparse update
    async fn update_customer(
        &self,
        id: CustomerId,
        request: CustomerUpdateRequest,
    ) -> CustomerResult<()>;

    /// Store a new profile image generation, returning its id
    async fn upload_profile_image(
        &self,
        id: CustomerId,
        data: Vec<u8>,
    ) -> CustomerResult<ProfileImageId>;

    /// Fetch the bytes of the current profile image
    async fn download_profile_image(&self, id: CustomerId) -> CustomerResult<Vec<u8>>;
}
