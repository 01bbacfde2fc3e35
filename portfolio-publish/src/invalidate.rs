//! CDN cache invalidation.

use async_trait::async_trait;
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client;
use chrono::Utc;

use crate::error::PublishError;

/// Every path on the distribution.
pub const WILDCARD: &str = "/*";

#[async_trait]
pub trait Invalidator: Send + Sync {
    /// Request invalidation of `paths`; returns the CDN's invalidation id.
    async fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[&str],
        caller_reference: &str,
    ) -> Result<String, PublishError>;
}

/// CloudFront-backed [`Invalidator`].
#[derive(Debug, Clone)]
pub struct CloudFrontInvalidator {
    client: Client,
}

impl CloudFrontInvalidator {
    pub fn new(sdk: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl Invalidator for CloudFrontInvalidator {
    async fn create_invalidation(
        &self,
        distribution_id: &str,
        paths: &[&str],
        caller_reference: &str,
    ) -> Result<String, PublishError> {
        let fail = |message: String| PublishError::Invalidation {
            distribution_id: distribution_id.to_string(),
            message,
        };

        let paths = Paths::builder()
            .quantity(paths.len() as i32)
            .set_items(Some(paths.iter().map(|p| p.to_string()).collect()))
            .build()
            .map_err(|e| fail(e.to_string()))?;
        let batch = InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(caller_reference)
            .build()
            .map_err(|e| fail(e.to_string()))?;

        let response = self
            .client
            .create_invalidation()
            .distribution_id(distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| fail(DisplayErrorContext(&e).to_string()))?;

        Ok(response
            .invalidation()
            .map(|inv| inv.id().to_string())
            .unwrap_or_default())
    }
}

/// What [`invalidate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidateOutcome {
    /// No distribution configured; nothing was sent.
    Skipped,
    /// Dry run; nothing was sent.
    DryRun { distribution_id: String },
    Created {
        distribution_id: String,
        invalidation_id: String,
    },
}

/// Invalidate [`WILDCARD`] on `distribution_id`, or do nothing when it is
/// `None`.
pub async fn invalidate(
    invalidator: &dyn Invalidator,
    distribution_id: Option<&str>,
    dry_run: bool,
) -> Result<InvalidateOutcome, PublishError> {
    let Some(distribution_id) = distribution_id else {
        tracing::info!("no CLOUDFRONT_DISTRIBUTION_ID set; skipping invalidate");
        return Ok(InvalidateOutcome::Skipped);
    };

    if dry_run {
        tracing::info!("[dry-run] CloudFront invalidate {distribution_id} {WILDCARD}");
        return Ok(InvalidateOutcome::DryRun {
            distribution_id: distribution_id.to_string(),
        });
    }

    let caller_reference = Utc::now().timestamp().to_string();
    let invalidation_id = invalidator
        .create_invalidation(distribution_id, &[WILDCARD], &caller_reference)
        .await?;
    tracing::info!("created CloudFront invalidation: {invalidation_id}");

    Ok(InvalidateOutcome::Created {
        distribution_id: distribution_id.to_string(),
        invalidation_id,
    })
}
