//! Batch quality analysis — orchestration, conversion, and reporting.
//!
//! [`QualityAnalysisService`] drives one batch call end to end: validate the
//! request, resolve the public mode to a gateway strategy, invoke the
//! analyzer backend, normalize its raw output into the public schema, and
//! attach aggregate statistics. Failure semantics are fail-fast: local
//! validation errors surface before any gateway work, and gateway failures
//! are logged with the analysis ID and re-raised unchanged.

pub mod convert;
pub mod mode;
pub mod schema;
pub mod service;
pub mod summary;

pub use schema::{
    DetectedBy, FileInput, FixSuggestion, FixType, QualityAnalysisResponse, QualityIssue,
    QualitySummary, Severity,
};
pub use service::{QualityAnalysisService, QualityError};
