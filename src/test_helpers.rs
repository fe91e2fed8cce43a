//! Shared test utilities for the helper test suite.
//!
//! Provides a small in-memory content tree, fixture loading, temporary web
//! roots and opt-in logging.
//!
//! # Sample tree
//!
//! ```text
//! media
//!   1101  /media/1101/harbour.jpg   altText, titleText, 2400x1600, crops: hero, mobile
//!   1102  /media/1102/pattern.png   no properties
//! content
//!   1050  /                          home
//!   1051  /about/                    seoNofollow = false
//!   1052  /about/print/              seoCanonical = 1051, seoNoindex = true
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::crop::Crop;
use crate::store::{ContentStore, StoredNode};

static INIT_LOGGING: Once = Once::new();

/// Install a test subscriber once. Uses `level` when given, else `RUST_LOG`;
/// with neither, logging stays off.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Log output shared between a capturing subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a subscriber recording events at `level` and above. Returns
/// one line per event, formatted as `LEVEL target: message`.
pub fn capture_logs(level: Level, f: impl FnOnce()) -> Vec<String> {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().unwrap().clone();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

// =========================================================================
// In-memory content
// =========================================================================

/// The sample tree described in the module docs.
pub fn sample_store() -> ContentStore {
    let mut store = ContentStore::new();
    store
        .insert_media(
            StoredNode::new(1101, "/media/1101/harbour.jpg")
                .with_key("9f3c2a4e-0b1d-4c55-a0e2-6d8f1b7c3e90")
                .with_property("altText", "Harbour at dawn")
                .with_property("titleText", "Fishing boats")
                .with_property("umbracoWidth", 2400_i64)
                .with_property("umbracoHeight", 1600_i64)
                .with_crop("hero", Crop::sized(1600, 600))
                .with_crop("mobile", Crop::sized(480, 320))
                .with_focal_point(0.5, 0.3),
        )
        .unwrap();
    store
        .insert_media(StoredNode::new(1102, "/media/1102/pattern.png"))
        .unwrap();
    store
        .insert_content(StoredNode::new(1050, "/"))
        .unwrap();
    store
        .insert_content(StoredNode::new(1051, "/about/").with_property("seoNofollow", false))
        .unwrap();
    store
        .insert_content(
            StoredNode::new(1052, "/about/print/")
                .with_property("seoCanonical", 1051_i64)
                .with_property("seoNoindex", true),
        )
        .unwrap();
    store
}

// =========================================================================
// Fixtures
// =========================================================================

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// The store in `fixtures/content.json`.
pub fn fixture_store() -> ContentStore {
    let path = fixtures_dir().join("content.json");
    ContentStore::load(&path)
        .unwrap_or_else(|e| panic!("fixture store {} failed to load: {e}", path.display()))
}

/// A temporary web root containing empty files at the given relative paths.
pub fn web_root_with(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        let path = tmp.path().join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, "").unwrap();
    }
    tmp
}
