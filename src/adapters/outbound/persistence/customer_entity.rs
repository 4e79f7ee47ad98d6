//! sea-orm mapping of the `customer` table

use sea_orm::{entity::prelude::*, ActiveValue::Set};

use crate::domain::{
    errors::{PersistenceError, PersistenceResult},
    models::{Customer, Gender},
    value_objects::{CustomerId, ProfileImageId},
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub age: i32,
    pub gender: String,
    #[sea_orm(unique)]
    pub profile_image_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Customer {
    type Error = PersistenceError;

    fn try_from(model: Model) -> PersistenceResult<Self> {
        let gender: Gender = model.gender.parse().map_err(|e| PersistenceError::CorruptRow {
            message: format!("customer {}: {}", model.id, e),
        })?;
        let profile_image_id =
            ProfileImageId::from_stored(model.profile_image_id).map_err(|e| {
                PersistenceError::CorruptRow {
                    message: format!("customer {}: {}", model.id, e),
                }
            })?;

        Ok(Customer {
            id: CustomerId::new(model.id),
            name: model.name,
            email: model.email,
            password: model.password,
            age: model.age,
            gender,
            profile_image_id,
        })
    }
}

impl From<&Customer> for ActiveModel {
    /// Every column is `Set`, so saving this model rewrites the whole row
    fn from(customer: &Customer) -> Self {
        ActiveModel {
            id: Set(customer.id.value()),
            name: Set(customer.name.clone()),
            email: Set(customer.email.clone()),
            password: Set(customer.password.clone()),
            age: Set(customer.age),
            gender: Set(customer.gender.as_str().to_string()),
            profile_image_id: Set(customer
                .profile_image_id
                .as_ref()
                .map(|id| id.as_str().to_string())),
        }
    }
}
