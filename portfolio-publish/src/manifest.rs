//! Upload manifest: which local file goes to which key, with which headers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::{io_err, PublishError};

/// `name.<hash>.ext` or `name-<hash>.ext`, hash at least 8 hex digits.
static HASHED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.-][0-9a-fA-F]{8,}\.[A-Za-z0-9]+$").expect("hashed-name pattern is valid")
});

// ---------------------------------------------------------------------------
// Cache policy
// ---------------------------------------------------------------------------

/// `Cache-Control` category for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// HTML and index documents: always revalidate.
    Revalidate,
    /// Content-hashed or build-scoped assets: cache for a year.
    Immutable,
    /// Everything else.
    Short,
}

impl CachePolicy {
    pub fn header(self) -> &'static str {
        match self {
            CachePolicy::Revalidate => "public, max-age=0, must-revalidate",
            CachePolicy::Immutable => "public, max-age=31536000, immutable",
            CachePolicy::Short => "public, max-age=300",
        }
    }

    /// Classify a `/`-separated path relative to the export root.
    ///
    /// HTML always revalidates. Build assets and content-hashed names are
    /// immutable even when their stem is `index`; any other `index.*`
    /// document revalidates.
    pub fn for_key(rel: &str) -> Self {
        let name = rel.rsplit('/').next().unwrap_or(rel);
        let stem = Path::new(name).file_stem().and_then(|s| s.to_str());

        if name.ends_with(".html") {
            CachePolicy::Revalidate
        } else if is_build_asset(rel) || HASHED_NAME.is_match(name) {
            CachePolicy::Immutable
        } else if stem == Some("index") {
            CachePolicy::Revalidate
        } else {
            CachePolicy::Short
        }
    }
}

fn is_build_asset(rel: &str) -> bool {
    rel.starts_with("_next/") || rel.contains("/_next/")
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// One file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub local_path: PathBuf,
    pub key: String,
    pub content_type: String,
    pub cache: CachePolicy,
}

impl ManifestEntry {
    pub fn new(local_path: PathBuf, rel: &str, prefix: Option<&str>) -> Self {
        let key = match prefix {
            Some(prefix) => format!("{prefix}/{rel}"),
            None => rel.to_string(),
        };
        Self {
            content_type: content_type_for(rel),
            cache: CachePolicy::for_key(rel),
            local_path,
            key,
        }
    }
}

/// MIME type guessed from the extension.
pub fn content_type_for(rel: &str) -> String {
    mime_guess::from_path(rel)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Recursively list every regular file under `root`, sorted by key.
///
/// Symlinks are not followed, so a link cycle in the export cannot stall
/// the walk.
pub fn build_manifest(
    root: &Path,
    prefix: Option<&str>,
) -> Result<Vec<ManifestEntry>, PublishError> {
    if !root.is_dir() {
        return Err(PublishError::MissingDir {
            path: root.to_path_buf(),
            hint: "run `portfolio build` first",
        });
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            io_err(path, err.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = relative_key(root, entry.path());
        entries.push(ManifestEntry::new(entry.into_path(), &rel, prefix));
    }
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(entries)
}

fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
