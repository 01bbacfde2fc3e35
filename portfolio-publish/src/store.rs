//! Object storage seam.
//!
//! [`ObjectStore`] is the only surface deploy talks to, so uploads can be
//! exercised against an in-memory store in tests.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;

use crate::error::PublishError;
use crate::manifest::ManifestEntry;

/// Region that must not carry an explicit location constraint.
const DEFAULT_LOCATION: &str = "us-east-1";

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// `Ok(false)` when the bucket does not exist.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, PublishError>;

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), PublishError>;

    /// Upload `body` under `entry.key` with the entry's headers. The error
    /// message is returned bare; deploy adds the key and progress.
    async fn put_object(
        &self,
        bucket: &str,
        entry: &ManifestEntry,
        body: Vec<u8>,
    ) -> Result<(), String>;
}

/// A `head_bucket` failure that means the bucket is absent rather than
/// unreachable or forbidden.
fn is_missing_bucket(err: Option<&HeadBucketError>) -> bool {
    err.is_some_and(HeadBucketError::is_not_found)
}

/// `us-east-1` rejects an explicit location constraint; every other region
/// requires one.
fn bucket_configuration(region: &str) -> Option<CreateBucketConfiguration> {
    (region != DEFAULT_LOCATION).then(|| {
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build()
    })
}

/// S3-backed [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(sdk: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, PublishError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) if is_missing_bucket(err.as_service_error()) => Ok(false),
            Err(err) => Err(PublishError::Bucket {
                bucket: bucket.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            }),
        }
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), PublishError> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(bucket_configuration(region))
            .send()
            .await
            .map_err(|err| PublishError::Bucket {
                bucket: bucket.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        entry: &ManifestEntry,
        body: Vec<u8>,
    ) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(&entry.key)
            .body(ByteStream::from(body))
            .content_type(&entry.content_type)
            .cache_control(entry.cache.header())
            .send()
            .await
            .map_err(|err| DisplayErrorContext(&err).to_string())?;
        Ok(())
    }
}
