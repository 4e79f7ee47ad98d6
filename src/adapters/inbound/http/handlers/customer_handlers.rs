use axum::{
    extract::{rejection::PathRejection, Multipart, OriginalUri, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::error;

use crate::{
    adapters::inbound::http::{
        dto::{ApiErrorDto, ProfileImageUploadedDto, RegistrationResponseDto, SuccessResponseDto},
        router::AppState,
    },
    domain::{
        errors::{CustomerError, ErrorKind},
        models::{CustomerFilter, CustomerRegistrationRequest, CustomerUpdateRequest, CustomerView},
        value_objects::CustomerId,
    },
};

type ApiError = (StatusCode, Json<ApiErrorDto>);

const PROFILE_IMAGE_FIELD: &str = "file";

fn api_error(uri: &OriginalUri, err: CustomerError) -> ApiError {
    if err.kind() == ErrorKind::Internal || err.kind() == ErrorKind::StorageFailure {
        error!(path = %uri.path(), error = ?err, "request failed");
    }
    let (status, body) = ApiErrorDto::from_customer_error(uri.path(), &err);
    (status, Json(body))
}

fn bad_request(uri: &OriginalUri, message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorDto::new(uri.path(), StatusCode::BAD_REQUEST, message)),
    )
}

fn path_customer_id(
    uri: &OriginalUri,
    path: Result<Path<CustomerId>, PathRejection>,
) -> Result<CustomerId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| bad_request(uri, format!("Invalid customer id: {}", e.body_text())))
}

/// Handle customer listing
pub async fn list_customers(
    State(app_state): State<AppState>,
    uri: OriginalUri,
    Query(filter): Query<CustomerFilter>,
) -> Result<Json<Vec<CustomerView>>, ApiError> {
    app_state
        .customer_service
        .list_customers(&filter)
        .await
        .map(Json)
        .map_err(|e| api_error(&uri, e))
}

/// Handle single customer retrieval
pub async fn get_customer(
    State(app_state): State<AppState>,
    uri: OriginalUri,
    path: Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<CustomerView>, ApiError> {
    let customer_id = path_customer_id(&uri, path)?;

    app_state
        .customer_service
        .get_customer(customer_id)
        .await
        .map(Json)
        .map_err(|e| api_error(&uri, e))
}

/// Handle registration
pub async fn register_customer(
    State(app_state): State<AppState>,
    uri: OriginalUri,
    Json(request): Json<CustomerRegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponseDto>), ApiError> {
    let id = app_state
        .customer_service
        .register_customer(request)
        .await
        .map_err(|e| api_error(&uri, e))?;

    Ok((StatusCode::CREATED, Json(RegistrationResponseDto { id })))
}

/// Handle customer deletion
pub async fn delete_customer(
    State(app_state): State<AppState>,
    uri: OriginalUri,
    path: Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<SuccessResponseDto>, ApiError> {
    let customer_id = path_customer_id(&uri, path)?;

    app_state
        .customer_service
        .delete_customer(customer_id)
        .await
        .map_err(|e| api_error(&uri, e))?;

    Ok(Json(
        SuccessResponseDto::new("Customer deleted successfully")
            .with_data(json!({ "id": customer_id })),
    ))
}

/// Handle sparse customer updates
pub async fn update_customer(
    State(app_state): State<AppState>,
    uri: OriginalUri,
    path: Result<Path<CustomerId>, PathRejection>,
    Json(request): Json<CustomerUpdateRequest>,
) -> Result<Json<SuccessResponseDto>, ApiError> {
    let customer_id = path_customer_id(&uri, path)?;

    app_state
        .customer_service
        .update_customer(customer_id, request)
        .await
        .map_err(|e| api_error(&uri, e))?;

    Ok(Json(
        SuccessResponseDto::new("Customer updated successfully")
            .with_data(json!({ "id": customer_id })),
    ))
}

/// Handle profile image upload from the multipart field `file`
pub async fn upload_profile_image(
    State(app_state): State<AppState>,
    uri: OriginalUri,
    path: Result<Path<CustomerId>, PathRejection>,
    mut multipart: Multipart,
) -> Result<Json<ProfileImageUploadedDto>, ApiError> {
    let customer_id = path_customer_id(&uri, path)?;

    let mut data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&uri, format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some(PROFILE_IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| bad_request(&uri, format!("Failed to read upload: {}", e)))?;
            data = Some(bytes.to_vec());
            break;
        }
    }

    let data = data.ok_or_else(|| {
        bad_request(
            &uri,
            format!("Missing multipart field '{}'", PROFILE_IMAGE_FIELD),
        )
    })?;

    let profile_image_id = app_state
        .customer_service
        .upload_profile_image(customer_id, data)
        .await
        .map_err(|e| api_error(&uri, e))?;

    Ok(Json(ProfileImageUploadedDto { profile_image_id }))
}

/// Handle profile image download
pub async fn download_profile_image(
    State(app_state): State<AppState>,
    uri: OriginalUri,
    path: Result<Path<CustomerId>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = path_customer_id(&uri, path)?;

    let data = app_state
        .customer_service
        .download_profile_image(customer_id)
        .await
        .map_err(|e| api_error(&uri, e))?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], data))
}
