//! Portfolio tiles snapshot.
//!
//! Both documents are fetched and validated before anything touches the
//! disk: either both files are written or neither is.

use std::path::{Path, PathBuf};

use portfolio_core::snapshot::{self, STATUS_FILE, TILES_FILE};
use portfolio_core::{Config, ServiceBase};

use crate::error::ProbeError;
use crate::http::HttpClient;

/// Paths written by [`snapshot_tiles`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesSnapshot {
    pub tiles: PathBuf,
    pub status: PathBuf,
}

/// Fetch `/tiles` and `/status` from `portfolio` and write them verbatim
/// under `dir`.
pub fn snapshot_tiles(
    client: &HttpClient,
    portfolio: &ServiceBase,
    dir: &Path,
) -> Result<TilesSnapshot, ProbeError> {
    let (tiles, _) = client.get_json(&portfolio.url("/tiles"))?;
    let (status, _) = client.get_json(&portfolio.url("/status"))?;

    let written = snapshot::write_set(
        dir,
        &[
            (TILES_FILE, tiles.as_bytes()),
            (STATUS_FILE, status.as_bytes()),
        ],
    )?;
    tracing::info!(dir = %dir.display(), files = written.len(), "wrote tile snapshots");

    Ok(TilesSnapshot {
        tiles: dir.join(TILES_FILE),
        status: dir.join(STATUS_FILE),
    })
}

/// Resolve the portfolio base and timeout from `config`, then
/// [`snapshot_tiles`] into `dir`.
pub fn snapshot_from_config(config: &Config, dir: &Path) -> Result<TilesSnapshot, ProbeError> {
    let portfolio = config.portfolio()?;
    let client = HttpClient::new(config.http_timeout()?);
    snapshot_tiles(&client, &portfolio, dir)
}
