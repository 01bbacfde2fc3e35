//! Static "paused" tile shown while the sentiment model is retraining.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::snapshot::{write_atomic, PLACEHOLDER_FILE};

/// Dashboard tile record. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderTile {
    pub group: String,
    pub tile: String,
    pub label: String,
    pub value: Option<String>,
    pub display: String,
    pub window: String,
    pub status: String,
    pub foot: String,
    pub updated_at: Option<String>,
}

impl PlaceholderTile {
    /// The paused sentiment tile.
    pub fn sentiment() -> Self {
        Self {
            group: "sentiment".to_string(),
            tile: "placeholder".to_string(),
            label: "SENTIMENT".to_string(),
            value: None,
            display: "TRAINING IN PROGRESS".to_string(),
            window: String::new(),
            status: "paused".to_string(),
            foot: String::new(),
            updated_at: None,
        }
    }

    /// Pretty-printed JSON with a trailing newline. Deterministic.
    pub fn render(&self) -> Result<String, SnapshotError> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// Write the sentiment placeholder into `dir` and return its path.
pub fn write_placeholder(dir: &Path) -> Result<PathBuf, SnapshotError> {
    let path = dir.join(PLACEHOLDER_FILE);
    let body = PlaceholderTile::sentiment().render()?;
    write_atomic(&path, body.as_bytes())?;
    tracing::info!(path = %path.display(), "wrote placeholder tile");
    Ok(path)
}
