//! Public quality analysis schema — the shapes callers receive.
//!
//! These are wire types: every field serializes under its snake_case name,
//! and the closed enums (`Severity`, `DetectedBy`, `FixType`) are the full
//! public vocabulary regardless of what the gateway emits internally.

use serde::{Deserialize, Serialize};

/// A source file submitted for analysis. Read-only for the duration of a
/// batch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInput {
    /// Path identifier (relative or absolute — treated as opaque).
    pub path: String,
    /// Full textual content of the file.
    pub content: String,
}

impl FileInput {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Issue severity. `Error` is the critical level; everything below it is
/// never counted as critical, however many lesser levels exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Which analyzer a finding came from. Exactly two public values — the
/// gateway's richer internal tagging is collapsed at conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectedBy {
    Rule,
    Llm,
}

/// How a fix suggestion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    Replace,
    Delete,
    Insert,
}

/// A proposed code edit attached to an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixSuggestion {
    #[serde(rename = "type")]
    pub fix_type: FixType,
    /// Suggested new text. Taken verbatim from the analyzer; may be empty
    /// for deletions.
    pub new_text: String,
    /// Natural-language description of the fix.
    pub description: String,
}

/// One normalized quality finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityIssue {
    pub file_path: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    pub severity: Severity,
    /// Issue code (e.g. `assertion-roulette`).
    pub code: String,
    pub message: String,
    pub detected_by: DetectedBy,
    /// Absent (not an empty object) when the analyzer offered no fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<FixSuggestion>,
}

/// Aggregate counts for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualitySummary {
    /// Number of files submitted — not the number that produced issues.
    pub total_files: usize,
    pub total_issues: usize,
    /// Issues at `Severity::Error`.
    pub critical_issues: usize,
}

/// Response for one `analyze_batch` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAnalysisResponse {
    /// Fresh per-call correlation ID. Two identical batches get two
    /// different IDs — no idempotency implied.
    pub analysis_id: String,
    pub summary: QualitySummary,
    /// Issues in gateway order; never re-sorted here.
    pub issues: Vec<QualityIssue>,
}
