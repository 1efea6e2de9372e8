//! Raw gateway output → public schema.
//!
//! This is the single choke point where the gateway's open-ended internal
//! tagging is collapsed into the closed public vocabulary. Field renames are
//! exact and lossless: `file` → `file_path`, `kind` → `code`, everything
//! else passes through by name.

use crate::analyzer::{RawIssue, RawSuggestion};
use crate::quality::schema::{DetectedBy, FixSuggestion, FixType, QualityIssue};

/// The one raw tag that means the deterministic rule matcher. Any other
/// spelling — including ones that do not exist yet — is treated as LLM
/// output, so new internal tags never break conversion.
const RULE_ENGINE_TAG: &str = "rule_engine";

/// Convert one raw issue into the public schema.
pub fn convert_issue(issue: RawIssue) -> QualityIssue {
    let detected_by = if issue.detected_by == RULE_ENGINE_TAG {
        DetectedBy::Rule
    } else {
        DetectedBy::Llm
    };

    QualityIssue {
        file_path: issue.file,
        line: issue.line,
        column: issue.column,
        severity: issue.severity,
        code: issue.kind,
        message: issue.message,
        detected_by,
        suggestion: issue.suggestion.map(convert_suggestion),
    }
}

/// Convert a raw fix proposal. `new_text` always comes from the raw
/// replacement field, even for deletions where it may be empty.
fn convert_suggestion(suggestion: RawSuggestion) -> FixSuggestion {
    // Unrecognized actions fall back to Replace rather than failing.
    // TODO: revisit whether malformed gateway actions should be rejected
    // instead of degraded (tracked as an open review item in DESIGN.md).
    let fix_type = match suggestion.action.as_str() {
        "replace" => FixType::Replace,
        "remove" => FixType::Delete,
        "add" => FixType::Insert,
        _ => FixType::Replace,
    };

    FixSuggestion {
        fix_type,
        new_text: suggestion.new_code,
        description: suggestion.explanation,
    }
}
