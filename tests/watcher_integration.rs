//! Integration tests for the watcher public API.

use legible::config::{DEFAULT_FILE_PATTERNS, DEFAULT_IMAGE_PATTERNS};
use legible::watcher::{is_document, DocumentWatcher};
use std::path::Path;

fn default_patterns() -> Vec<String> {
    DEFAULT_FILE_PATTERNS
        .iter()
        .chain(DEFAULT_IMAGE_PATTERNS)
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn watcher_accepts_text_and_image_documents() {
    let patterns = default_patterns();
    assert!(is_document(Path::new("notes.txt"), &patterns));
    assert!(is_document(Path::new("chapter.md"), &patterns));
    assert!(is_document(Path::new("scans/page-01.tiff"), &patterns));
    assert!(is_document(Path::new("photo.JPG"), &patterns));
}

#[test]
fn watcher_rejects_other_files() {
    let patterns = default_patterns();
    assert!(!is_document(Path::new("Cargo.toml"), &patterns));
    assert!(!is_document(Path::new(".legiblerc.json"), &patterns));
    assert!(!is_document(Path::new(".git/info/exclude.txt"), &patterns));
}

#[test]
fn watcher_watch_temp_dir_succeeds() {
    let dir = tempfile::TempDir::new().unwrap();
    let watcher = match DocumentWatcher::watch(dir.path(), default_patterns()) {
        Ok(w) => w,
        Err(e) => panic!("watch on temp dir should succeed: {}", e),
    };
    assert!(watcher.is_document(Path::new("page.png")));
}
