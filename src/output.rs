//! CLI output formatting for the ingest report.
//!
//! Format functions are pure (return `Vec<String>`, no I/O) so tests can
//! assert on them directly; `print_*` wrappers write to stdout.

use crate::ingest::IngestReport;

/// Format a reconciliation summary.
///
/// ```text
/// Processed 14 image files
///     Inserted: 3
///     Skipped (already cataloged): 11
/// Catalog now holds 120 images
/// ```
pub fn format_ingest_report(report: &IngestReport) -> Vec<String> {
    vec![
        format!("Processed {} image files", report.processed),
        format!("    Inserted: {}", report.inserted),
        format!("    Skipped (already cataloged): {}", report.skipped),
        format!("Catalog now holds {} images", report.total_rows),
    ]
}

pub fn print_ingest_report(report: &IngestReport) {
    for line in format_ingest_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lines_carry_all_counts() {
        let report = IngestReport {
            processed: 14,
            inserted: 3,
            skipped: 11,
            total_rows: 120,
        };
        let lines = format_ingest_report(&report);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Processed 14 image files");
        assert_eq!(lines[1], "    Inserted: 3");
        assert_eq!(lines[2], "    Skipped (already cataloged): 11");
        assert_eq!(lines[3], "Catalog now holds 120 images");
    }

    #[test]
    fn empty_run_formats_zeroes() {
        let lines = format_ingest_report(&IngestReport::default());
        assert_eq!(lines[0], "Processed 0 image files");
        assert_eq!(lines[3], "Catalog now holds 0 images");
    }
}
