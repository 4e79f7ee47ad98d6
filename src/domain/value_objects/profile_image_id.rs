use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::ValidationError;

/// Identifies one uploaded generation of a customer's profile image.
///
/// A fresh id is generated for every upload, so uploading the same bytes
/// twice still produces two distinct ids (and two distinct object keys).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileImageId(String);

impl ProfileImageId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyProfileImageId);
        }
        if value.contains('/') || value.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidProfileImageId(value));
        }
        Ok(Self(value))
    }

    /// Read a nullable stored id; a blank value means no image was recorded
    pub fn from_stored(value: Option<String>) -> Result<Option<Self>, ValidationError> {
        value
            .filter(|v| !v.trim().is_empty())
            .map(Self::new)
            .transpose()
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProfileImageId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProfileImageId> for String {
    fn from(id: ProfileImageId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProfileImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
