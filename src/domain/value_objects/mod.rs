mod bucket_name;
mod customer_id;
mod object_key;
mod profile_image_id;

pub use bucket_name::{BucketName, DEFAULT_CUSTOMER_BUCKET};
pub use customer_id::CustomerId;
pub use object_key::ObjectKey;
pub use profile_image_id::ProfileImageId;
