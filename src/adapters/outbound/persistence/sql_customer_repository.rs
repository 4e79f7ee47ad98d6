use async_trait::async_trait;
use sqlx::{
    any::{AnyPoolOptions, AnyRow},
    AnyPool, Row,
};
use tracing::debug;

use crate::{
    adapters::outbound::persistence::SqlDialect,
    domain::{
        errors::{PersistenceError, PersistenceResult},
        models::{Customer, CustomerPatch, Gender, NewCustomer},
        value_objects::{CustomerId, ProfileImageId},
    },
    ports::repositories::CustomerRepository,
};

const SELECT_CUSTOMER: &str =
    "SELECT id, name, email, password, age, gender, profile_image_id FROM customer";

/// Direct-SQL implementation of CustomerRepository.
///
/// Runs on sqlx's `Any` driver so the same statements serve PostgreSQL in
/// production and SQLite in tests.
#[derive(Clone)]
pub struct SqlCustomerRepository {
    pool: AnyPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` (`postgres://...` or `sqlite:...`)
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let backend = conn.backend_name().to_string();
        let dialect = SqlDialect::from_backend_name(&backend).ok_or_else(|| {
            sqlx::Error::Configuration(format!("unsupported database backend: {}", backend).into())
        })?;

        sqlx::query(dialect.create_customer_table())
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    async fn set_column<'q, T>(
        &self,
        statement: &'q str,
        value: T,
        id: CustomerId,
    ) -> PersistenceResult<()>
    where
        T: 'q + Send + sqlx::Encode<'q, sqlx::Any> + sqlx::Type<sqlx::Any>,
    {
        sqlx::query(statement)
            .bind(value)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("updating customer", e))?;
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> PersistenceError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            PersistenceError::ConstraintViolation {
                message: db_err.message().to_string(),
            }
        }
        _ => PersistenceError::database(operation, err),
    }
}

fn customer_from_row(row: &AnyRow) -> PersistenceResult<Customer> {
    let corrupt = |e: &dyn std::fmt::Display| PersistenceError::CorruptRow {
        message: e.to_string(),
    };

    let id: i64 = row.try_get("id").map_err(|e| corrupt(&e))?;
    let gender: String = row.try_get("gender").map_err(|e| corrupt(&e))?;
    let gender: Gender = gender.parse().map_err(|e| corrupt(&e))?;
    let profile_image_id: Option<String> =
        row.try_get("profile_image_id").map_err(|e| corrupt(&e))?;
    let profile_image_id = ProfileImageId::from_stored(profile_image_id).map_err(|e| corrupt(&e))?;

    Ok(Customer {
        id: CustomerId::new(id),
        name: row.try_get("name").map_err(|e| corrupt(&e))?,
        email: row.try_get("email").map_err(|e| corrupt(&e))?,
        password: row.try_get("password").map_err(|e| corrupt(&e))?,
        age: row.try_get("age").map_err(|e| corrupt(&e))?,
        gender,
        profile_image_id,
    })
}

#[async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn list_all(&self) -> PersistenceResult<Vec<Customer>> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_CUSTOMER))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("listing customers", e))?;

        rows.iter().map(customer_from_row).collect()
    }

    async fn find_by_id(&self, id: CustomerId) -> PersistenceResult<Option<Customer>> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_CUSTOMER))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("loading customer", e))?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> PersistenceResult<Option<Customer>> {
        let row = sqlx::query(&format!("{} WHERE email = $1", SELECT_CUSTOMER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("loading customer by email", e))?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> PersistenceResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM customer WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("checking email", e))?;

        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: CustomerId) -> PersistenceResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM customer WHERE id = $1")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("checking customer id", e))?;

        Ok(count > 0)
    }

    async fn insert(&self, customer: &NewCustomer) -> PersistenceResult<CustomerId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO customer (name, email, password, age, gender)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(customer.name.as_str())
        .bind(customer.email.as_str())
        .bind(customer.password.as_str())
        .bind(customer.age)
        .bind(customer.gender.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("inserting customer", e))?;

        Ok(CustomerId::new(id))
    }

    /// One statement per patched column, each applied on its own
    async fn update(&self, patch: &CustomerPatch) -> PersistenceResult<()> {
        if let Some(name) = &patch.name {
            self.set_column("UPDATE customer SET name = $1 WHERE id = $2", name.as_str(), patch.id)
                .await?;
        }

        if let Some(age) = patch.age {
            self.set_column("UPDATE customer SET age = $1 WHERE id = $2", age, patch.id)
                .await?;
        }

        if let Some(email) = &patch.email {
            self.set_column("UPDATE customer SET email = $1 WHERE id = $2", email.as_str(), patch.id)
                .await?;
        }

        if let Some(gender) = patch.gender {
            self.set_column(
                "UPDATE customer SET gender = $1 WHERE id = $2",
                gender.as_str(),
                patch.id,
            )
            .await?;
        }

        debug!(customer_id = %patch.id, fields = ?patch.changed_fields(), "customer columns written");
        Ok(())
    }

    async fn delete_by_id(&self, id: CustomerId) -> PersistenceResult<()> {
        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("deleting customer", e))?;

        Ok(())
    }

    async fn update_profile_image_id(
        &self,
        id: CustomerId,
        image_id: &ProfileImageId,
    ) -> PersistenceResult<()> {
        self.set_column(
            "UPDATE customer SET profile_image_id = $1 WHERE id = $2",
            image_id.as_str(),
            id,
        )
        .await
    }
}
