pub mod analyzer;
pub mod quality;

// Re-export the service surface so callers can use qualityd::QualityAnalysisService directly.
pub use analyzer::{AnalysisStrategy, AnalyzerGateway, RawIssue, RawSuggestion};
pub use quality::{
    FileInput, QualityAnalysisResponse, QualityAnalysisService, QualityError, QualityIssue,
};
