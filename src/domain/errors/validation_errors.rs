/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,

    // BucketName validation errors
    BucketNameTooShort {
        actual: usize,
        min: usize,
    },
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    BucketNameConsecutiveHyphens,
    BucketNameLooksLikeIpAddress,

    // ProfileImageId validation errors
    EmptyProfileImageId,
    InvalidProfileImageId(String),

    // Customer field validation errors
    UnknownGender(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: '{}'", c.escape_default())
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }

            // BucketName errors
            ValidationError::BucketNameTooShort { actual, min } => {
                write!(
                    f,
                    "Bucket name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidEnd => {
                write!(f, "Bucket name must end with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only lowercase letters, numbers, and hyphens allowed",
                    c
                )
            }
            ValidationError::BucketNameConsecutiveHyphens => {
                write!(f, "Bucket name cannot contain consecutive hyphens")
            }
            ValidationError::BucketNameLooksLikeIpAddress => {
                write!(f, "Bucket name cannot be formatted as an IP address")
            }

            // ProfileImageId errors
            ValidationError::EmptyProfileImageId => {
                write!(f, "Profile image id cannot be empty")
            }
            ValidationError::InvalidProfileImageId(value) => {
                write!(f, "Invalid profile image id: '{}'", value)
            }

            // Customer field errors
            ValidationError::UnknownGender(value) => {
                write!(f, "Unknown gender '{}' (expected: MALE or FEMALE)", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
