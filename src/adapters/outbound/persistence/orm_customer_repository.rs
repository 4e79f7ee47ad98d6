use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait,
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};
use tracing::debug;

use super::customer_entity::{self, Column, Entity};
use crate::{
    adapters::outbound::persistence::SqlDialect,
    domain::{
        errors::{PersistenceError, PersistenceResult},
        models::{Customer, CustomerPatch, NewCustomer},
        value_objects::{CustomerId, ProfileImageId},
    },
    ports::repositories::CustomerRepository,
};

/// Mapped-object implementation of CustomerRepository on sea-orm.
///
/// Updates overlay the patch on the loaded entity and save the whole row
/// in one statement, where the SQL backend writes column by column.
#[derive(Clone)]
pub struct OrmCustomerRepository {
    db: DatabaseConnection,
}

impl OrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(url.to_owned());
        options.max_connections(max_connections).sqlx_logging(false);

        let db = Database::connect(options).await?;
        Ok(Self::new(db))
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), DbErr> {
        let dialect = match self.db.get_database_backend() {
            DbBackend::Postgres => SqlDialect::Postgres,
            DbBackend::Sqlite => SqlDialect::Sqlite,
            other => {
                return Err(DbErr::Custom(format!(
                    "unsupported database backend: {:?}",
                    other
                )))
            }
        };

        self.db
            .execute_unprepared(dialect.create_customer_table())
            .await?;
        Ok(())
    }

    async fn find_model(&self, id: CustomerId) -> PersistenceResult<Option<customer_entity::Model>> {
        Entity::find_by_id(id.value())
            .one(&self.db)
            .await
            .map_err(|e| map_db_error("loading customer", e))
    }
}

fn map_db_error(operation: &str, err: DbErr) -> PersistenceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            PersistenceError::ConstraintViolation { message }
        }
        _ => PersistenceError::database(operation, err),
    }
}

#[async_trait]
impl CustomerRepository for OrmCustomerRepository {
    async fn list_all(&self) -> PersistenceResult<Vec<Customer>> {
        Entity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_error("listing customers", e))?
            .into_iter()
            .map(Customer::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: CustomerId) -> PersistenceResult<Option<Customer>> {
        self.find_model(id).await?.map(Customer::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> PersistenceResult<Option<Customer>> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| map_db_error("loading customer by email", e))?
            .map(Customer::try_from)
            .transpose()
    }

    async fn exists_by_email(&self, email: &str) -> PersistenceResult<bool> {
        let count = Entity::find()
            .filter(Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| map_db_error("checking email", e))?;
        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: CustomerId) -> PersistenceResult<bool> {
        let count = Entity::find()
            .filter(Column::Id.eq(id.value()))
            .count(&self.db)
            .await
            .map_err(|e| map_db_error("checking customer id", e))?;
        Ok(count > 0)
    }

    async fn insert(&self, customer: &NewCustomer) -> PersistenceResult<CustomerId> {
        let model = customer_entity::ActiveModel {
            id: NotSet,
            name: Set(customer.name.clone()),
            email: Set(customer.email.clone()),
            password: Set(customer.password.clone()),
            age: Set(customer.age),
            gender: Set(customer.gender.as_str().to_string()),
            profile_image_id: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_db_error("inserting customer", e))?;

        Ok(CustomerId::new(model.id))
    }

    async fn update(&self, patch: &CustomerPatch) -> PersistenceResult<()> {
        let Some(model) = self.find_model(patch.id).await? else {
            debug!(customer_id = %patch.id, "update of missing customer ignored");
            return Ok(());
        };

        let current = Customer::try_from(model)?;
        let updated = patch.apply(&current);

        customer_entity::ActiveModel::from(&updated)
            .update(&self.db)
            .await
            .map_err(|e| map_db_error("saving customer", e))?;
        Ok(())
    }

    async fn delete_by_id(&self, id: CustomerId) -> PersistenceResult<()> {
        Entity::delete_by_id(id.value())
            .exec(&self.db)
            .await
            .map_err(|e| map_db_error("deleting customer", e))?;
        Ok(())
    }

    async fn update_profile_image_id(
        &self,
        id: CustomerId,
        image_id: &ProfileImageId,
    ) -> PersistenceResult<()> {
        Entity::update_many()
            .col_expr(Column::ProfileImageId, Expr::value(image_id.as_str()))
            .filter(Column::Id.eq(id.value()))
            .exec(&self.db)
            .await
            .map_err(|e| map_db_error("updating profile image id", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Gender;
    use crate::{
        adapters::outbound::{security::Argon2PasswordEncoder, storage::ApacheObjectStoreAdapter},
        domain::{errors::CustomerError, value_objects::BucketName},
        ports::services::CustomerService,
        services::{Buckets, CustomerServiceImpl},
    };
    use std::sync::Arc;

    fn customer_service_over(repository: Arc<dyn CustomerRepository>) -> CustomerServiceImpl {
        let bucket = BucketName::default_customer();
        CustomerServiceImpl::new(
            repository,
            Arc::new(ApacheObjectStoreAdapter::in_memory([bucket.clone()])),
            Arc::new(Argon2PasswordEncoder::new()),
            Buckets { customer: bucket },
        )
    }

    async fn sqlite_repository() -> OrmCustomerRepository {
        let repo = OrmCustomerRepository::connect("sqlite::memory:", 1)
            .await
            .unwrap();
        repo.migrate().await.unwrap();
        repo
    }

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            name: "Kim".to_string(),
            email: email.to_string(),
            password: "hash".to_string(),
            age: 52,
            gender: Gender::Female,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let repo = sqlite_repository().await;

        let first = repo.insert(&new_customer("kim@example.com")).await.unwrap();
        let second = repo.insert(&new_customer("lee@example.com")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            repo.find_by_id(first).await.unwrap(),
            Some(new_customer("kim@example.com").with_id(first))
        );
    }

    #[tokio::test]
    async fn test_update_saves_whole_row_with_patch_applied() {
        let repo = sqlite_repository().await;
        let id = repo.insert(&new_customer("kim@example.com")).await.unwrap();
        let image_id = ProfileImageId::generate();
        repo.update_profile_image_id(id, &image_id).await.unwrap();

        let mut patch = CustomerPatch::new(id);
        patch.name = Some("Kimberly".to_string());
        patch.gender = Some(Gender::Male);
        repo.update(&patch).await.unwrap();

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Kimberly");
        assert_eq!(stored.gender, Gender::Male);
        assert_eq!(stored.email, "kim@example.com");
        assert_eq!(stored.password, "hash");
        assert_eq!(stored.profile_image_id, Some(image_id));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_violation() {
        let repo = sqlite_repository().await;
        repo.insert(&new_customer("kim@example.com")).await.unwrap();

        let err = repo.insert(&new_customer("kim@example.com")).await.unwrap_err();
        assert!(
            matches!(err, PersistenceError::ConstraintViolation { .. }),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let repo = sqlite_repository().await;
        repo.delete_by_id(CustomerId::new(404)).await.unwrap();
        assert!(!repo.exists_by_id(CustomerId::new(404)).await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_profile_image_id_reads_as_no_image() {
        let repo = sqlite_repository().await;
        let id = repo.insert(&new_customer("kim@example.com")).await.unwrap();
        repo.insert(&new_customer("lee@example.com")).await.unwrap();

        repo.db
            .execute_unprepared(&format!(
                "UPDATE customer SET profile_image_id = '  ' WHERE id = {}",
                id
            ))
            .await
            .unwrap();

        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().profile_image_id, None);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);

        let service = customer_service_over(Arc::new(repo));
        assert!(service.get_customer(id).await.is_ok());
        let err = service.download_profile_image(id).await.unwrap_err();
        assert!(
            matches!(err, CustomerError::ProfileImageNotFound { .. }),
            "unexpected error: {err}"
        );
    }
}
