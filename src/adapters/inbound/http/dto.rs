use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::{CustomerError, ErrorKind},
    value_objects::{CustomerId, ProfileImageId},
};

/// Body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDto {
    pub path: String,
    pub message: String,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
}

/// DTO for success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponseDto {
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// Returned after a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponseDto {
    pub id: CustomerId,
}

/// Returned after a successful profile image upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileImageUploadedDto {
    pub profile_image_id: ProfileImageId,
}

impl From<ErrorKind> for StatusCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::StorageFailure | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiErrorDto {
    pub fn new(path: &str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
            status_code: status.as_u16(),
            timestamp: Utc::now(),
        }
    }

    /// Internal failures are reported generically; the cause goes to the log
    pub fn from_customer_error(path: &str, error: &CustomerError) -> (StatusCode, Self) {
        let status = StatusCode::from(error.kind());
        let message = match error.kind() {
            ErrorKind::Internal => "internal server error".to_string(),
            _ => error.to_string(),
        };
        (status, Self::new(path, status, message))
    }
}

impl SuccessResponseDto {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
