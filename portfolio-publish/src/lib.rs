//! # portfolio-publish
//!
//! Build the static frontend, upload it to S3, invalidate CloudFront, and
//! chain those steps behind `verify` in [`pipeline::run_all`].

pub mod aws;
pub mod build;
pub mod deploy;
pub mod error;
pub mod invalidate;
pub mod manifest;
pub mod pipeline;
pub mod store;

pub use build::{build_static, SystemToolchain, Toolchain};
pub use deploy::{deploy, DeployOptions, DeployReport};
pub use error::PublishError;
pub use invalidate::{invalidate, CloudFrontInvalidator, InvalidateOutcome, Invalidator};
pub use manifest::{build_manifest, CachePolicy, ManifestEntry};
pub use pipeline::{run_all, LiveStages, PipelineReport, Stage, StageFailure, StageOutcome, Stages};
pub use store::{ObjectStore, S3Store};
