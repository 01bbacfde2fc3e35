//! Upload a static export to object storage.
//!
//! Uploads are sequential and not transactional: when one fails, the files
//! before it stay uploaded and the error says how many made it.

use crate::error::PublishError;
use crate::manifest::ManifestEntry;
use crate::store::ObjectStore;

/// Log a progress line every this many uploads.
pub const PROGRESS_EVERY: usize = 50;

/// Where and how to deploy.
#[derive(Debug, Clone)]
pub struct DeployOptions<'a> {
    pub bucket: &'a str,
    pub region: &'a str,
    pub dry_run: bool,
}

/// Outcome of a deploy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    pub bucket: String,
    /// Files actually uploaded (zero in dry-run).
    pub uploaded: usize,
    /// Files in the manifest.
    pub planned: usize,
    pub bucket_created: bool,
    pub dry_run: bool,
}

/// Ensure the bucket exists, then upload every manifest entry in order.
pub async fn deploy(
    store: &dyn ObjectStore,
    manifest: &[ManifestEntry],
    options: &DeployOptions<'_>,
) -> Result<DeployReport, PublishError> {
    let DeployOptions {
        bucket,
        region,
        dry_run,
    } = *options;
    let prefix = if dry_run { "[dry-run] " } else { "" };

    let mut report = DeployReport {
        bucket: bucket.to_string(),
        planned: manifest.len(),
        dry_run,
        ..DeployReport::default()
    };

    if store.bucket_exists(bucket).await? {
        tracing::info!("bucket exists: s3://{bucket}");
    } else {
        tracing::info!("{prefix}creating bucket: {bucket} ({region})");
        if !dry_run {
            store.create_bucket(bucket, region).await?;
        }
        report.bucket_created = true;
    }

    for entry in manifest {
        if dry_run {
            tracing::info!(
                "[dry-run] PUT s3://{bucket}/{} ({}, {})",
                entry.key,
                entry.content_type,
                entry.cache
            );
            continue;
        }

        let body = tokio::fs::read(&entry.local_path)
            .await
            .map_err(|source| PublishError::LocalRead {
                path: entry.local_path.clone(),
                uploaded: report.uploaded,
                source,
            })?;
        store
            .put_object(bucket, entry, body)
            .await
            .map_err(|message| PublishError::Upload {
                key: entry.key.clone(),
                uploaded: report.uploaded,
                message,
            })?;

        report.uploaded += 1;
        if report.uploaded % PROGRESS_EVERY == 0 {
            tracing::info!("uploaded {} of {} files...", report.uploaded, report.planned);
        }
    }

    tracing::info!("{prefix}uploaded total: {}", report.uploaded);
    Ok(report)
}
