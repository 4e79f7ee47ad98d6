//! S3 / MinIO backed stores built with the object_store crate

use anyhow::{Context, Result};
use object_store::{aws::AmazonS3Builder, ObjectStore as ObjectStoreBackend};
use std::sync::Arc;

use crate::domain::value_objects::BucketName;

/// Connection settings shared by every bucket on one S3-compatible endpoint
#[derive(Debug, Clone)]
pub struct S3Config {
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Custom endpoint, e.g. a MinIO server
    pub endpoint: Option<String>,
    pub allow_http: bool,
}

/// Create an S3 store for one bucket
pub fn create_s3_store(config: &S3Config, bucket: &BucketName) -> Result<Arc<dyn ObjectStoreBackend>> {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(bucket.as_str())
        .with_region(&config.region)
        .with_allow_http(config.allow_http);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    let store = builder
        .build()
        .with_context(|| format!("Failed to build S3 store for bucket {}", bucket))?;

    Ok(Arc::new(store))
}
