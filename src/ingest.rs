//! Content directory reconciliation.
//!
//! One-shot synchronization between a directory tree of image files and the
//! catalog. Safe to re-run at any time: every discovered file is inserted
//! with [`Catalog::create_if_absent`], so a second run over an unchanged tree
//! inserts nothing and existing moderation state is never touched.
//!
//! ## Algorithm
//!
//! 1. Create the content directory if missing (idempotent, not an error).
//! 2. Walk it recursively in a deterministic (name-sorted) order.
//! 3. Keep files whose extension is one of `.png`, `.jpg`, `.jpeg`
//!    (case-insensitive); everything else is ignored.
//! 4. Derive each file's path relative to the content root, normalized to
//!    forward slashes, so the same logical filename is produced on any host
//!    platform.
//! 5. Insert each missing filename as a pending row, all stamped with the
//!    same run timestamp.
//!
//! A duplicate filename is an expected, non-fatal skip (counted, logged at
//! debug). Any other storage failure aborts the run.

use crate::catalog::{Catalog, CatalogError};
use chrono::Utc;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File extensions the reconciler considers images (lowercase).
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Summary of one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Image files seen in the content directory.
    pub processed: usize,
    /// New rows created this run.
    pub inserted: usize,
    /// Files already cataloged (duplicate filename).
    pub skipped: usize,
    /// Total rows in the catalog after the run, any status.
    pub total_rows: i64,
}

/// Reconcile `content_dir` into `catalog`.
pub fn ingest(content_dir: &Path, catalog: &Catalog) -> Result<IngestReport, IngestError> {
    fs::create_dir_all(content_dir)?;

    // One timestamp per run: files discovered together sort together.
    let now = Utc::now();
    let mut report = IngestReport::default();

    for entry in walkdir::WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }

        let filename = relative_slash_path(entry.path(), content_dir);
        report.processed += 1;

        if catalog.create_if_absent(&filename, now)? {
            tracing::debug!(file = %filename, "inserted");
            report.inserted += 1;
        } else {
            tracing::debug!(file = %filename, "already cataloged, skipping");
            report.skipped += 1;
        }
    }

    report.total_rows = catalog.count()?;
    tracing::info!(
        processed = report.processed,
        inserted = report.inserted,
        skipped = report.skipped,
        total = report.total_rows,
        "ingest complete"
    );
    Ok(report)
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Path relative to `root`, joined with `/` regardless of host separator.
fn relative_slash_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
