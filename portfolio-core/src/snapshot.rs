//! Atomic snapshot writes.
//!
//! Every file is written to `<path>.tmp` first and renamed into place, so a
//! reader never observes a half-written snapshot.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SnapshotError};

pub const TILES_FILE: &str = "tiles.json";
pub const STATUS_FILE: &str = "status.json";
pub const PLACEHOLDER_FILE: &str = "sentiment_placeholder.json";

/// Write `content` to `path` via a sibling `.tmp` file and rename.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote snapshot");
    Ok(())
}

/// Write several `(file name, content)` pairs under `dir`.
///
/// Callers validate every document before calling this, so the only way to
/// end up with a partial set is a local I/O failure.
pub fn write_set(dir: &Path, files: &[(&str, &[u8])]) -> Result<Vec<PathBuf>, SnapshotError> {
    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        write_atomic(&path, content)?;
        written.push(path);
    }
    Ok(written)
}
