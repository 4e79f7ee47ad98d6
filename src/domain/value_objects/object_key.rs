use crate::domain::{
    errors::ValidationError,
    value_objects::{CustomerId, ProfileImageId},
};

const MAX_KEY_LEN: usize = 1024;
const PROFILE_IMAGE_PREFIX: &str = "profile-images";

/// A validated object key (path) inside a bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > MAX_KEY_LEN {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: MAX_KEY_LEN,
            });
        }

        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Key of one profile image generation:
    /// `profile-images/{customer_id}/{profile_image_id}`
    pub fn profile_image(
        customer_id: CustomerId,
        image_id: &ProfileImageId,
    ) -> Result<Self, ValidationError> {
        Self::new(format!("{}/{}/{}", PROFILE_IMAGE_PREFIX, customer_id, image_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
