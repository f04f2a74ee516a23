//! Shared test utilities.
//!
//! Builds throwaway content trees and looks up catalog rows so store and
//! reconciler tests don't repeat fixture plumbing.

use std::fs;
use tempfile::TempDir;

use crate::catalog::Catalog;
use crate::types::{ImageRecord, StatusFilter};

/// Create a temp directory containing the given relative files.
///
/// Intermediate directories are created as needed; every file gets
/// placeholder bytes (nothing in the crate reads image contents).
pub fn content_tree(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        let path = tmp.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"fake image").unwrap();
    }
    tmp
}

/// Find a record by filename. Panics with the available names on a miss.
pub fn find_record(catalog: &Catalog, filename: &str) -> ImageRecord {
    let records = catalog.list(StatusFilter::All).unwrap();
    records
        .iter()
        .find(|r| r.filename == filename)
        .cloned()
        .unwrap_or_else(|| {
            let names: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
            panic!("record '{filename}' not found. Available: {names:?}")
        })
}
