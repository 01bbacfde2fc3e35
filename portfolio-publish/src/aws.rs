//! AWS SDK configuration and the per-invocation async runtime.

use aws_sdk_s3::config::Region;
use tokio::runtime::Runtime;

use portfolio_core::Config;

use crate::error::PublishError;

/// Load shared SDK configuration for `config`'s region. Credentials come
/// from the default provider chain (environment first).
pub async fn load_sdk_config(config: &Config) -> Result<aws_config::SdkConfig, PublishError> {
    config.check_credentials()?;
    let sdk = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region().to_string()))
        .load()
        .await;
    Ok(sdk)
}

/// Single-threaded runtime used to drive the SDK from synchronous commands.
pub fn runtime() -> Result<Runtime, PublishError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(PublishError::Runtime)
}
