use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{
    errors::ValidationError,
    value_objects::{CustomerId, ProfileImageId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Name stored in the `gender` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            other => Err(ValidationError::UnknownGender(other.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted customer, as loaded from a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    /// Encoded password; never leaves the service
    pub password: String,
    pub age: i32,
    pub gender: Gender,
    pub profile_image_id: Option<ProfileImageId>,
}

/// A customer that has not been inserted yet and so has no id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    pub gender: Gender,
}

impl NewCustomer {
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            age: self.age,
            gender: self.gender,
            profile_image_id: None,
        }
    }
}

/// Caller-facing projection of a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub age: i32,
    pub profile_image_id: Option<ProfileImageId>,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            gender: customer.gender,
            age: customer.age,
            profile_image_id: customer.profile_image_id,
        }
    }
}
