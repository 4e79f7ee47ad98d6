use async_trait::async_trait;
use customer_service::{
    domain::{
        errors::{PersistenceResult, StorageError, StorageResult},
        models::{Customer, CustomerPatch, NewCustomer},
    },
    ports::security::{PasswordEncoder, PasswordEncodingError},
    ApacheObjectStoreAdapter, BucketName, Buckets, CustomerError, CustomerFilter, CustomerId,
    CustomerRegistrationRequest, CustomerRepository, CustomerService, CustomerServiceBuilder,
    CustomerServiceImpl, CustomerUpdateRequest, ErrorKind, Gender, InMemoryCustomerRepository,
    ObjectKey, ObjectStore, ProfileImageId,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Repository that records which writes reach it
#[derive(Default)]
struct SpyRepository {
    inner: InMemoryCustomerRepository,
    deletes: AtomicUsize,
    updates: AtomicUsize,
}

#[async_trait]
impl CustomerRepository for SpyRepository {
    async fn list_all(&self) -> PersistenceResult<Vec<Customer>> {
        self.inner.list_all().await
    }

    async fn find_by_id(&self, id: CustomerId) -> PersistenceResult<Option<Customer>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> PersistenceResult<Option<Customer>> {
        self.inner.find_by_email(email).await
    }

    async fn exists_by_email(&self, email: &str) -> PersistenceResult<bool> {
        self.inner.exists_by_email(email).await
    }

    async fn exists_by_id(&self, id: CustomerId) -> PersistenceResult<bool> {
        self.inner.exists_by_id(id).await
    }

    async fn insert(&self, customer: &NewCustomer) -> PersistenceResult<CustomerId> {
        self.inner.insert(customer).await
    }

    async fn update(&self, patch: &CustomerPatch) -> PersistenceResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(patch).await
    }

    async fn delete_by_id(&self, id: CustomerId) -> PersistenceResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_id(id).await
    }

    async fn update_profile_image_id(
        &self,
        id: CustomerId,
        image_id: &ProfileImageId,
    ) -> PersistenceResult<()> {
        self.inner.update_profile_image_id(id, image_id).await
    }
}

/// Store whose writes always fail
struct BrokenStore;

#[async_trait]
impl ObjectStore for BrokenStore {
    async fn put_object(&self, _: &BucketName, _: &ObjectKey, _: Vec<u8>) -> StorageResult<()> {
        Err(StorageError::InfrastructureError {
            message: "connection refused".to_string(),
            source: None,
        })
    }

    async fn get_object(&self, _: &BucketName, _: &ObjectKey) -> StorageResult<Vec<u8>> {
        Err(StorageError::InfrastructureError {
            message: "connection refused".to_string(),
            source: None,
        })
    }
}

/// Reversible encoder so tests can see what was stored
struct PlainPrefixEncoder;

impl PasswordEncoder for PlainPrefixEncoder {
    fn encode(&self, raw: &str) -> Result<String, PasswordEncodingError> {
        Ok(format!("encoded:{}", raw))
    }

    fn matches(&self, raw: &str, encoded: &str) -> Result<bool, PasswordEncodingError> {
        Ok(encoded == format!("encoded:{}", raw))
    }
}

struct Harness {
    service: CustomerServiceImpl,
    repository: Arc<SpyRepository>,
    store: Arc<ApacheObjectStoreAdapter>,
    bucket: BucketName,
}

fn harness() -> Harness {
    let bucket = BucketName::default_customer();
    let repository = Arc::new(SpyRepository::default());
    let store = Arc::new(ApacheObjectStoreAdapter::in_memory([bucket.clone()]));

    let service = CustomerServiceBuilder::new()
        .repository(repository.clone())
        .store(store.clone())
        .password_encoder(Arc::new(PlainPrefixEncoder))
        .buckets(Buckets {
            customer: bucket.clone(),
        })
        .build()
        .unwrap();

    Harness {
        service,
        repository,
        store,
        bucket,
    }
}

fn registration(name: &str, email: &str) -> CustomerRegistrationRequest {
    CustomerRegistrationRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "password".to_string(),
        age: 30,
        gender: Gender::Male,
    }
}

#[tokio::test]
async fn test_register_then_get_returns_request_fields() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    let view = h.service.get_customer(id).await.unwrap();
    assert_eq!(view.id, id);
    assert_eq!(view.name, "Alex");
    assert_eq!(view.email, "alex@example.com");
    assert_eq!(view.age, 30);
    assert_eq!(view.gender, Gender::Male);
    assert_eq!(view.profile_image_id, None);

    let stored = h.repository.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.password, "encoded:password");
}

#[tokio::test]
async fn test_view_json_has_no_password() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    let json = serde_json::to_value(h.service.get_customer(id).await.unwrap()).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["gender"], "MALE");
}

#[tokio::test]
async fn test_get_missing_customer() {
    let h = harness();
    let err = h.service.get_customer(CustomerId::new(42)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "customer with id [42] not found");
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let h = harness();
    h.service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    let err = h
        .service
        .register_customer(registration("Other Alex", "alex@example.com"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "Email already taken");
    assert_eq!(h.repository.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let h = harness();
    let err = h
        .service
        .register_customer(registration("  ", "alex@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::InvalidRequest { .. }));
    assert!(h.repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_applies_filter() {
    let h = harness();
    for (name, email) in [
        ("Alex Smith", "alex@example.com"),
        ("Sam Smith", "sam@example.com"),
        ("Jo Brown", "jo@example.com"),
    ] {
        h.service
            .register_customer(registration(name, email))
            .await
            .unwrap();
    }

    let all = h
        .service
        .list_customers(&CustomerFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let smiths = h
        .service
        .list_customers(&CustomerFilter::new().with_name("smith"))
        .await
        .unwrap();
    assert_eq!(smiths.len(), 2);

    let jo = h
        .service
        .list_customers(&CustomerFilter::new().with_email("jo@example.com"))
        .await
        .unwrap();
    assert_eq!(jo.len(), 1);
    assert_eq!(jo[0].name, "Jo Brown");
}

#[tokio::test]
async fn test_update_without_changes_writes_nothing() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();
    let before = h.service.get_customer(id).await.unwrap();

    let err = h
        .service
        .update_customer(id, CustomerUpdateRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CustomerError::NoChanges));
    assert_eq!(err.to_string(), "no data changes found");

    let same_values = CustomerUpdateRequest {
        name: Some("Alex".to_string()),
        email: Some("alex@example.com".to_string()),
        age: Some(30),
        gender: Some(Gender::Male),
    };
    let err = h.service.update_customer(id, same_values).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(h.repository.updates.load(Ordering::SeqCst), 0);
    assert_eq!(h.service.get_customer(id).await.unwrap(), before);
}

#[tokio::test]
async fn test_update_name_only_changes_name() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    h.service
        .update_customer(
            id,
            CustomerUpdateRequest {
                name: Some("Alexandra".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let view = h.service.get_customer(id).await.unwrap();
    assert_eq!(view.name, "Alexandra");
    assert_eq!(view.email, "alex@example.com");
    assert_eq!(view.age, 30);
    assert_eq!(view.gender, Gender::Male);
}

#[tokio::test]
async fn test_update_to_taken_email_is_conflict() {
    let h = harness();
    let alex = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();
    h.service
        .register_customer(registration("Sam", "sam@example.com"))
        .await
        .unwrap();

    let err = h
        .service
        .update_customer(
            alex,
            CustomerUpdateRequest {
                email: Some("sam@example.com".to_string()),
                age: Some(31),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::EmailTaken { .. }));
    assert_eq!(h.service.get_customer(alex).await.unwrap().age, 30);
}

#[tokio::test]
async fn test_update_missing_customer() {
    let h = harness();
    let err = h
        .service
        .update_customer(
            CustomerId::new(5),
            CustomerUpdateRequest {
                age: Some(40),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::CustomerNotFound { .. }));
}

#[tokio::test]
async fn test_delete_missing_customer_issues_no_delete() {
    let h = harness();
    let err = h
        .service
        .delete_customer(CustomerId::new(99))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(h.repository.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_delete_existing_customer() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    h.service.delete_customer(id).await.unwrap();

    assert_eq!(h.repository.deletes.load(Ordering::SeqCst), 1);
    assert!(h.service.get_customer(id).await.is_err());
}

#[tokio::test]
async fn test_upload_then_download_and_reupload() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    let first = h
        .service
        .upload_profile_image(id, b"first image".to_vec())
        .await
        .unwrap();
    assert_eq!(
        h.service.download_profile_image(id).await.unwrap(),
        b"first image"
    );

    let second = h
        .service
        .upload_profile_image(id, b"second image".to_vec())
        .await
        .unwrap();
    assert_ne!(first, second);
    assert_eq!(
        h.service.get_customer(id).await.unwrap().profile_image_id,
        Some(second.clone())
    );
    assert_eq!(
        h.service.download_profile_image(id).await.unwrap(),
        b"second image"
    );

    // Earlier blobs are left in place.
    let old_key = ObjectKey::profile_image(id, &first).unwrap();
    assert_eq!(
        h.store.get_object(&h.bucket, &old_key).await.unwrap(),
        b"first image"
    );
}

#[tokio::test]
async fn test_upload_for_missing_customer() {
    let h = harness();
    let err = h
        .service
        .upload_profile_image(CustomerId::new(3), vec![1, 2, 3])
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::CustomerNotFound { .. }));
}

#[tokio::test]
async fn test_download_without_image_is_distinct_not_found() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    let err = h.service.download_profile_image(id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, CustomerError::ProfileImageNotFound { .. }));
    assert_eq!(
        err.to_string(),
        format!("customer with id [{}] profile image not found", id)
    );
}

#[tokio::test]
async fn test_download_with_missing_blob_is_profile_image_not_found() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();
    h.repository
        .update_profile_image_id(id, &ProfileImageId::generate())
        .await
        .unwrap();

    let err = h.service.download_profile_image(id).await.unwrap_err();
    assert!(matches!(err, CustomerError::ProfileImageNotFound { .. }));
}

#[tokio::test]
async fn test_failing_store_leaves_record_untouched() {
    let repository = Arc::new(InMemoryCustomerRepository::new());
    let service = CustomerServiceImpl::new(
        repository.clone(),
        Arc::new(BrokenStore),
        Arc::new(PlainPrefixEncoder),
        Buckets {
            customer: BucketName::default_customer(),
        },
    );

    let id = service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();

    let err = service
        .upload_profile_image(id, b"image".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert!(matches!(
        err,
        CustomerError::UploadFailed {
            source: StorageError::InfrastructureError { .. }
        }
    ));

    let stored = repository.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.profile_image_id, None);
}

#[tokio::test]
async fn test_builder_requires_all_parts() {
    let result = CustomerServiceBuilder::new()
        .repository(Arc::new(InMemoryCustomerRepository::new()))
        .build();

    assert!(result.is_err());
}

#[tokio::test]
async fn test_oversized_stored_image_id_is_internal_error() {
    let h = harness();
    let id = h
        .service
        .register_customer(registration("Alex", "alex@example.com"))
        .await
        .unwrap();
    let oversized = ProfileImageId::new("x".repeat(2048)).unwrap();
    h.repository
        .update_profile_image_id(id, &oversized)
        .await
        .unwrap();

    let err = h.service.download_profile_image(id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(h.service.get_customer(id).await.is_ok());
}
