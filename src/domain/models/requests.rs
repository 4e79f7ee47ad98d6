use serde::{Deserialize, Serialize};

use crate::domain::{
    models::{Customer, Gender},
    value_objects::CustomerId,
};

/// Request to register a new customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    /// Raw password; encoded by the service before it is stored
    pub password: String,
    pub age: i32,
    pub gender: Gender,
}

/// Sparse update request; only the fields that are present are considered
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
}

impl CustomerUpdateRequest {
    /// Compute the fields of `current` this request actually changes.
    ///
    /// A field is part of the patch only when it is present in the request
    /// and differs from the stored value.
    pub fn diff(&self, current: &Customer) -> CustomerPatch {
        fn changed<T: PartialEq + Clone>(requested: &Option<T>, current: &T) -> Option<T> {
            requested.as_ref().filter(|v| *v != current).cloned()
        }

        CustomerPatch {
            id: current.id,
            name: changed(&self.name, &current.name),
            email: changed(&self.email, &current.email),
            age: changed(&self.age, &current.age),
            gender: changed(&self.gender, &current.gender),
        }
    }
}

/// The set of customer fields to write for one update.
///
/// Repositories persist exactly the fields that are `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerPatch {
    pub id: CustomerId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
}

impl CustomerPatch {
    pub fn new(id: CustomerId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            age: None,
            gender: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none() && self.gender.is_none()
    }

    /// Names of the fields this patch writes, for logging
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.age.is_some() {
            fields.push("age");
        }
        if self.gender.is_some() {
            fields.push("gender");
        }
        if self.email.is_some() {
            fields.push("email");
        }
        fields
    }

    /// A copy of `customer` with the patched fields overridden
    pub fn apply(&self, customer: &Customer) -> Customer {
        Customer {
            id: customer.id,
            name: self.name.clone().unwrap_or_else(|| customer.name.clone()),
            email: self.email.clone().unwrap_or_else(|| customer.email.clone()),
            password: customer.password.clone(),
            age: self.age.unwrap_or(customer.age),
            gender: self.gender.unwrap_or(customer.gender),
            profile_image_id: customer.profile_image_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Customer {
        Customer {
            id: CustomerId::new(9),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password: "hash".to_string(),
            age: 41,
            gender: Gender::Male,
            profile_image_id: None,
        }
    }

    #[test]
    fn test_empty_request_produces_empty_patch() {
        let patch = CustomerUpdateRequest::default().diff(&stored());
        assert!(patch.is_empty());
        assert_eq!(patch.id, CustomerId::new(9));
    }

    #[test]
    fn test_equal_values_are_not_changes() {
        let current = stored();
        let request = CustomerUpdateRequest {
            name: Some(current.name.clone()),
            email: Some(current.email.clone()),
            age: Some(current.age),
            gender: Some(current.gender),
        };

        assert!(request.diff(&current).is_empty());
    }

    #[test]
    fn test_only_differing_fields_are_staged() {
        let current = stored();
        let request = CustomerUpdateRequest {
            name: Some("Jo".to_string()),
            email: None,
            age: Some(42),
            gender: Some(Gender::Female),
        };

        let patch = request.diff(&current);
        assert_eq!(patch.name, None);
        assert_eq!(patch.age, Some(42));
        assert_eq!(patch.gender, Some(Gender::Female));
        assert_eq!(patch.changed_fields(), vec!["age", "gender"]);
    }

    #[test]
    fn test_apply_overrides_only_patched_fields() {
        let current = stored();
        let mut patch = CustomerPatch::new(current.id);
        patch.email = Some("jo@example.org".to_string());

        let updated = patch.apply(&current);
        assert_eq!(updated.email, "jo@example.org");
        assert_eq!(updated.name, current.name);
        assert_eq!(updated.password, current.password);
        assert_eq!(updated.age, current.age);
    }
}
