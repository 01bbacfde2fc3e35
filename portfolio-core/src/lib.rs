//! Portfolio deploy core library — configuration, domain types, errors and
//! local snapshot files.
//!
//! - [`config`] — environment-backed [`Config`]
//! - [`types`] — service descriptors
//! - [`error`] — [`ConfigError`], [`SnapshotError`]
//! - [`snapshot`] — atomic JSON snapshot writes
//! - [`placeholder`] — the paused sentiment tile

pub mod config;
pub mod error;
pub mod placeholder;
pub mod snapshot;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, SnapshotError};
pub use placeholder::PlaceholderTile;
pub use types::{ServiceBase, ServiceKind};
