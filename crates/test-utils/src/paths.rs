//! Temporary file helpers.
//!
//! Directories created here are removed automatically when the returned
//! `TempDir` is dropped.

use std::path::{Path, PathBuf};

/// Creates a temporary directory for test input.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
///
/// # Arguments
///
/// * `prefix` - A prefix for the directory name (e.g., "filestore_test")
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Writes `contents` to `dir/relative`, creating parent directories.
///
/// Returns the full path of the written file.
pub fn write_test_file(dir: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create test directory");
    }
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}
