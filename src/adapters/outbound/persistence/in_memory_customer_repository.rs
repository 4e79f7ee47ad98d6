use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{PersistenceError, PersistenceResult},
        models::{Customer, CustomerPatch, NewCustomer},
        value_objects::{CustomerId, ProfileImageId},
    },
    ports::repositories::CustomerRepository,
};

/// In-memory implementation of CustomerRepository for testing and development.
///
/// Mirrors the SQL schema's unique constraint on `email`, so racing
/// registrations fail here the same way they fail against a database.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    data: Arc<RwLock<RepositoryData>>,
}

#[derive(Default)]
struct RepositoryData {
    customers: BTreeMap<CustomerId, Customer>,
    last_id: i64,
}

impl RepositoryData {
    fn email_taken_by_other(&self, email: &str, id: Option<CustomerId>) -> bool {
        self.customers
            .values()
            .any(|c| c.email == email && Some(c.id) != id)
    }
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_email(email: &str) -> PersistenceError {
    PersistenceError::ConstraintViolation {
        message: format!("duplicate email '{}'", email),
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list_all(&self) -> PersistenceResult<Vec<Customer>> {
        let data = self.data.read().await;
        Ok(data.customers.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CustomerId) -> PersistenceResult<Option<Customer>> {
        let data = self.data.read().await;
        Ok(data.customers.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> PersistenceResult<Option<Customer>> {
        let data = self.data.read().await;
        Ok(data.customers.values().find(|c| c.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> PersistenceResult<bool> {
        let data = self.data.read().await;
        Ok(data.customers.values().any(|c| c.email == email))
    }

    async fn exists_by_id(&self, id: CustomerId) -> PersistenceResult<bool> {
        let data = self.data.read().await;
        Ok(data.customers.contains_key(&id))
    }

    async fn insert(&self, customer: &NewCustomer) -> PersistenceResult<CustomerId> {
        let mut data = self.data.write().await;

        if data.email_taken_by_other(&customer.email, None) {
            return Err(duplicate_email(&customer.email));
        }

        data.last_id += 1;
        let id = CustomerId::new(data.last_id);
        data.customers.insert(id, customer.clone().with_id(id));

        Ok(id)
    }

    async fn update(&self, patch: &CustomerPatch) -> PersistenceResult<()> {
        let mut data = self.data.write().await;

        if let Some(email) = &patch.email {
            if data.email_taken_by_other(email, Some(patch.id)) {
                return Err(duplicate_email(email));
            }
        }

        if let Some(stored) = data.customers.get_mut(&patch.id) {
            *stored = patch.apply(stored);
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: CustomerId) -> PersistenceResult<()> {
        let mut data = self.data.write().await;
        data.customers.remove(&id);
        Ok(())
    }

    async fn update_profile_image_id(
        &self,
        id: CustomerId,
        image_id: &ProfileImageId,
    ) -> PersistenceResult<()> {
        let mut data = self.data.write().await;
        if let Some(stored) = data.customers.get_mut(&id) {
            stored.profile_image_id = Some(image_id.clone());
        }
        Ok(())
    }
}
