//! Public mode vocabulary → internal analysis strategy.
//!
//! The externally advertised names (`fast` / `deep` / `hybrid`) are fixed;
//! the gateway's strategy naming can change behind [`AnalysisStrategy`]
//! without breaking callers.

use crate::analyzer::AnalysisStrategy;
use crate::quality::service::QualityError;

/// The accepted public mode names, in the order they are advertised.
pub const ALLOWED_MODES: [&str; 3] = ["fast", "deep", "hybrid"];

/// Resolve a public mode name to the gateway strategy.
///
/// Total and deterministic over the allowed set; anything else fails with
/// [`QualityError::InvalidMode`] naming the offending value.
pub fn resolve_mode(mode: &str) -> Result<AnalysisStrategy, QualityError> {
    match mode {
        "fast" => Ok(AnalysisStrategy::RulesOnly),
        "deep" => Ok(AnalysisStrategy::LlmOnly),
        "hybrid" => Ok(AnalysisStrategy::Hybrid),
        other => Err(QualityError::InvalidMode {
            mode: other.to_string(),
            allowed: ALLOWED_MODES.join(", "),
        }),
    }
}
