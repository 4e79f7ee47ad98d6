use serde::Deserialize;

use crate::domain::models::Customer;

/// Optional criteria for listing customers
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CustomerFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Exact email
    pub email: Option<String>,
}

impl CustomerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, |n| n.trim().is_empty())
            && self.email.as_deref().map_or(true, |e| e.trim().is_empty())
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        let name_matches = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => customer
                .name
                .to_lowercase()
                .contains(&name.to_lowercase()),
            _ => true,
        };

        let email_matches = match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => customer.email == email,
            _ => true,
        };

        name_matches && email_matches
    }
}
