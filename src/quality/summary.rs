//! Aggregate statistics for one batch. Pure; no failure modes.

use crate::quality::schema::{FileInput, QualityIssue, QualitySummary, Severity};

/// Derive the batch summary from the submitted files and converted issues.
///
/// `total_files` counts every submitted file, including ones that produced
/// no issues (or failed to parse inside the gateway). Critical means
/// `Severity::Error` exactly.
pub fn summarize(files: &[FileInput], issues: &[QualityIssue]) -> QualitySummary {
    let critical_issues = issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count();

    QualitySummary {
        total_files: files.len(),
        total_issues: issues.len(),
        critical_issues,
    }
}
