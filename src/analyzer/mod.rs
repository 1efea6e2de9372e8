//! Analyzer gateway boundary — the one capability this core depends on.
//!
//! The gateway is supplied at construction time (rule engine + LLM analyzer
//! pairing in production); the core sees only this trait: hand it a file
//! batch and a strategy, get back raw issues. Its internals, fan-out across
//! files, and failure causes are invisible here.

use async_trait::async_trait;

use crate::quality::schema::{FileInput, Severity};

// ─── Strategy vocabulary ──────────────────────────────────────────────────────

/// Internal analysis strategy understood by the gateway.
///
/// This is deliberately separate from the public mode names (`fast` / `deep` /
/// `hybrid`) so the gateway's vocabulary can evolve without touching the
/// public contract. See [`crate::quality::mode::resolve_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStrategy {
    /// Deterministic rule matching only. Low latency.
    RulesOnly,
    /// Generative analyzer only. Slow, richer findings.
    LlmOnly,
    /// Run both and merge results.
    Hybrid,
}

impl AnalysisStrategy {
    /// Stable wire name for logging and gateway dispatch.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStrategy::RulesOnly => "rules-only",
            AnalysisStrategy::LlmOnly => "llm-only",
            AnalysisStrategy::Hybrid => "hybrid",
        }
    }
}

// ─── Raw output types ─────────────────────────────────────────────────────────

/// One defect as reported by the gateway, before normalization.
///
/// The `detected_by` tag is an open string: the gateway may grow new internal
/// spellings, and only the conversion layer decides what they mean publicly.
#[derive(Debug, Clone)]
pub struct RawIssue {
    /// File identifier the issue was found in.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    pub severity: Severity,
    /// Issue type/code string (e.g. `assertion-roulette`).
    pub kind: String,
    pub message: String,
    /// Which analyzer produced this issue (`rule_engine`, `llm`, ...).
    pub detected_by: String,
    /// Proposed fix, when the analyzer has one. Explicitly optional — the
    /// gateway contract declares presence, callers never probe for it.
    pub suggestion: Option<RawSuggestion>,
}

/// A raw fix proposal attached to an issue.
#[derive(Debug, Clone)]
pub struct RawSuggestion {
    /// Edit action: `replace`, `remove`, or `add`.
    pub action: String,
    /// Replacement/insertion text. May be empty for removals.
    pub new_code: String,
    /// Text being replaced, when the action has one.
    pub old_code: Option<String>,
    /// Natural-language explanation of the fix.
    pub explanation: String,
}

// ─── Gateway trait ────────────────────────────────────────────────────────────

/// Common interface for analyzer backends.
///
/// `analyze` suspends for the duration of the analysis (network- or
/// compute-bound, especially under the LLM or hybrid strategies) and may fail
/// with a backend-specific error this core does not interpret — it is logged
/// with the analysis ID and re-raised unchanged.
#[async_trait]
pub trait AnalyzerGateway: Send + Sync {
    /// Analyze the file batch under the given strategy and return every issue
    /// found, in the order the backend reports them.
    async fn analyze(
        &self,
        files: &[FileInput],
        strategy: AnalysisStrategy,
    ) -> anyhow::Result<Vec<RawIssue>>;

    /// Release whatever resources the backend holds (connections, clients).
    async fn close(&self) -> anyhow::Result<()>;
}
