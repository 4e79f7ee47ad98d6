use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    delete_customer, download_profile_image, get_customer, list_customers, register_customer,
    update_customer, upload_profile_image,
};
use crate::ports::services::CustomerService;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<dyn CustomerService>,
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/customers",
            get(list_customers).post(register_customer),
        )
        .route(
            "/api/v1/customers/{customer_id}",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .route(
            "/api/v1/customers/{customer_id}/profile-image",
            get(download_profile_image).post(upload_profile_image),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
