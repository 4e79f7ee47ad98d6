use std::str::FromStr;

use crate::domain::errors::ValidationError;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 63;

pub const DEFAULT_CUSTOMER_BUCKET: &str = "customers";

/// An S3-compatible bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.len() < MIN_LEN {
            return Err(ValidationError::BucketNameTooShort {
                actual: value.len(),
                min: MIN_LEN,
            });
        }
        if value.len() > MAX_LEN {
            return Err(ValidationError::BucketNameTooLong {
                actual: value.len(),
                max: MAX_LEN,
            });
        }

        let is_edge = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
        if !value.starts_with(is_edge) {
            return Err(ValidationError::BucketNameInvalidStart);
        }
        if !value.ends_with(is_edge) {
            return Err(ValidationError::BucketNameInvalidEnd);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(ValidationError::BucketNameInvalidCharacter(c));
        }

        if value.contains("--") {
            return Err(ValidationError::BucketNameConsecutiveHyphens);
        }

        if Self::looks_like_ip_address(&value) {
            return Err(ValidationError::BucketNameLooksLikeIpAddress);
        }

        Ok(Self(value))
    }

    /// The bucket holding customer profile images unless configured otherwise
    pub fn default_customer() -> Self {
        Self(DEFAULT_CUSTOMER_BUCKET.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn looks_like_ip_address(s: &str) -> bool {
        let parts: Vec<&str> = s.split('.').collect();
        parts.len() == 4 && parts.iter().all(|part| part.parse::<u8>().is_ok())
    }
}

impl FromStr for BucketName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
