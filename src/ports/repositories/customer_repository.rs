use async_trait::async_trait;

use crate::domain::{
    errors::PersistenceResult,
    models::{Customer, CustomerPatch, NewCustomer},
    value_objects::{CustomerId, ProfileImageId},
};

/// Persistence port for customers.
///
/// Every backend must be observationally identical: the same sequence of
/// calls leaves the same stored state, whatever the write granularity.
#[async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    /// All stored customers; ordering is not part of the contract
    async fn list_all(&self) -> PersistenceResult<Vec<Customer>>;

    async fn find_by_id(&self, id: CustomerId) -> PersistenceResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> PersistenceResult<Option<Customer>>;

    async fn exists_by_email(&self, email: &str) -> PersistenceResult<bool>;

    async fn exists_by_id(&self, id: CustomerId) -> PersistenceResult<bool>;

    /// Insert a new customer and return the id the backend assigned
    async fn insert(&self, customer: &NewCustomer) -> PersistenceResult<CustomerId>;

    /// Write the fields set on `patch`; unset fields keep their stored value
    async fn update(&self, patch: &CustomerPatch) -> PersistenceResult<()>;

    /// Delete by id. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: CustomerId) -> PersistenceResult<()>;

    /// Single-column write of the current profile image generation
    async fn update_profile_image_id(
        &self,
        id: CustomerId,
        image_id: &ProfileImageId,
    ) -> PersistenceResult<()>;
}
