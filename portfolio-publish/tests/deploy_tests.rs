//! Deploy against an in-memory object store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use portfolio_publish::{
    build_manifest, deploy, CachePolicy, DeployOptions, ManifestEntry, ObjectStore, PublishError,
};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Stored {
    body: Vec<u8>,
    content_type: String,
    cache_control: String,
}

#[derive(Default)]
struct MemoryStore {
    exists: bool,
    created: Mutex<Vec<(String, String)>>,
    objects: Mutex<BTreeMap<String, Stored>>,
    reject_key: Option<String>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn bucket_exists(&self, _bucket: &str) -> Result<bool, PublishError> {
        Ok(self.exists)
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), PublishError> {
        self.created
            .lock()
            .expect("lock")
            .push((bucket.to_string(), region.to_string()));
        Ok(())
    }

    async fn put_object(
        &self,
        _bucket: &str,
        entry: &ManifestEntry,
        body: Vec<u8>,
    ) -> Result<(), String> {
        if self.reject_key.as_deref() == Some(entry.key.as_str()) {
            return Err("AccessDenied".to_string());
        }
        self.objects.lock().expect("lock").insert(
            entry.key.clone(),
            Stored {
                body,
                content_type: entry.content_type.clone(),
                cache_control: entry.cache.header().to_string(),
            },
        );
        Ok(())
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

fn export_tree() -> TempDir {
    let dir = TempDir::new().expect("tmp");
    write(dir.path(), "index.html", "<html></html>");
    write(dir.path(), "about/index.html", "<html>about</html>");
    write(dir.path(), "_next/static/chunks/main-3f2a1b4c5d6e7f80.js", "js");
    write(dir.path(), "assets/site.a1b2c3d4e5.css", "css");
    write(dir.path(), "robots.txt", "User-agent: *");
    dir
}

fn options(dry_run: bool) -> DeployOptions<'static> {
    DeployOptions {
        bucket: "portfolio-site",
        region: "us-east-2",
        dry_run,
    }
}

#[test]
fn manifest_assigns_headers_by_category() {
    let dir = export_tree();
    let manifest = build_manifest(dir.path(), None).expect("manifest");

    let keys: Vec<_> = manifest.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "_next/static/chunks/main-3f2a1b4c5d6e7f80.js",
            "about/index.html",
            "assets/site.a1b2c3d4e5.css",
            "index.html",
            "robots.txt",
        ]
    );

    for entry in &manifest {
        if entry.key.ends_with(".html") {
            assert_eq!(entry.cache, CachePolicy::Revalidate, "{}", entry.key);
            assert_eq!(entry.content_type, "text/html");
        }
    }
    let css = manifest.iter().find(|e| e.key.ends_with(".css")).expect("css");
    assert_eq!(css.cache, CachePolicy::Immutable);
    assert_eq!(css.content_type, "text/css");
}

#[test]
fn manifest_of_missing_dir_points_at_build() {
    let dir = TempDir::new().expect("tmp");
    let err = build_manifest(&dir.path().join("out"), None).unwrap_err();
    assert!(matches!(err, PublishError::MissingDir { .. }), "got: {err}");
    assert!(err.to_string().contains("portfolio build"));
}

#[cfg(unix)]
#[test]
fn manifest_skips_symlink_cycles() {
    let dir = export_tree();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).expect("symlink");

    let manifest = build_manifest(dir.path(), None).expect("manifest");

    assert_eq!(manifest.len(), 5);
    assert!(manifest.iter().all(|e| !e.key.starts_with("loop")));
}

#[tokio::test]
async fn uploads_every_file_with_prefix_and_headers() {
    let dir = export_tree();
    let manifest = build_manifest(dir.path(), Some("site")).expect("manifest");
    let store = MemoryStore {
        exists: true,
        ..MemoryStore::default()
    };

    let report = deploy(&store, &manifest, &options(false)).await.expect("deploy");

    assert_eq!(report.uploaded, 5);
    assert_eq!(report.planned, 5);
    assert!(!report.bucket_created);

    let objects = store.objects.lock().expect("lock");
    let index = objects.get("site/index.html").expect("index uploaded");
    assert_eq!(index.body, b"<html></html>");
    assert_eq!(index.cache_control, "public, max-age=0, must-revalidate");
    let chunk = objects
        .get("site/_next/static/chunks/main-3f2a1b4c5d6e7f80.js")
        .expect("chunk uploaded");
    assert_eq!(chunk.cache_control, "public, max-age=31536000, immutable");
    let robots = objects.get("site/robots.txt").expect("robots uploaded");
    assert_eq!(robots.cache_control, "public, max-age=300");
}

#[tokio::test]
async fn missing_bucket_is_created_in_region() {
    let dir = export_tree();
    let manifest = build_manifest(dir.path(), None).expect("manifest");
    let store = MemoryStore::default();

    let report = deploy(&store, &manifest, &options(false)).await.expect("deploy");

    assert!(report.bucket_created);
    assert_eq!(
        *store.created.lock().expect("lock"),
        vec![("portfolio-site".to_string(), "us-east-2".to_string())]
    );
}

#[tokio::test]
async fn dry_run_uploads_and_creates_nothing() {
    let dir = export_tree();
    let manifest = build_manifest(dir.path(), None).expect("manifest");
    let store = MemoryStore::default();

    let report = deploy(&store, &manifest, &options(true)).await.expect("deploy");

    assert!(report.dry_run);
    assert_eq!(report.uploaded, 0);
    assert_eq!(report.planned, 5);
    assert!(store.created.lock().expect("lock").is_empty());
    assert!(store.objects.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn rejected_upload_reports_key_and_progress() {
    let dir = export_tree();
    let manifest = build_manifest(dir.path(), None).expect("manifest");
    let store = MemoryStore {
        exists: true,
        reject_key: Some("index.html".to_string()),
        ..MemoryStore::default()
    };

    let err = deploy(&store, &manifest, &options(false)).await.unwrap_err();

    match err {
        PublishError::Upload { key, uploaded, .. } => {
            assert_eq!(key, "index.html");
            assert_eq!(uploaded, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Partial upload is left in place.
    assert_eq!(store.objects.lock().expect("lock").len(), 3);
}

#[tokio::test]
async fn unreadable_file_reports_progress() {
    let dir = export_tree();
    let manifest = build_manifest(dir.path(), None).expect("manifest");
    fs::remove_file(dir.path().join("index.html")).expect("remove");
    let store = MemoryStore {
        exists: true,
        ..MemoryStore::default()
    };

    let err = deploy(&store, &manifest, &options(false)).await.unwrap_err();

    match err {
        PublishError::LocalRead { path, uploaded, .. } => {
            assert!(path.ends_with("index.html"), "{}", path.display());
            assert_eq!(uploaded, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.objects.lock().expect("lock").len(), 3);
}
