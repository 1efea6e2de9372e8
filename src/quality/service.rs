//! Batch quality analysis orchestrator.
//!
//! One logical flow per call: validate → resolve mode → invoke the gateway
//! (the lone suspend point) → convert → summarize. The service holds no
//! mutable per-call state, so concurrent batches against one instance need
//! no locking; IDs and timing are independent per call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::analyzer::AnalyzerGateway;
use crate::quality::convert::convert_issue;
use crate::quality::mode::resolve_mode;
use crate::quality::schema::{FileInput, QualityAnalysisResponse};
use crate::quality::summary::summarize;

/// Orchestrates batch analysis against an injected [`AnalyzerGateway`].
///
/// The service owns the gateway handle for its lifetime; callers must invoke
/// [`close`](Self::close) when done so the backend can release connections.
/// Default gateway construction is deliberately not done here — wiring lives
/// with the caller.
pub struct QualityAnalysisService {
    analyzer: Arc<dyn AnalyzerGateway>,
    closed: AtomicBool,
}

impl QualityAnalysisService {
    /// Build a service around a ready-made gateway.
    pub fn new(analyzer: Arc<dyn AnalyzerGateway>) -> Self {
        Self {
            analyzer,
            closed: AtomicBool::new(false),
        }
    }

    /// Analyze a batch of files and return normalized issues plus summary.
    ///
    /// `mode` is one of `fast`, `deep`, or `hybrid`. Fails with
    /// [`QualityError::EmptyBatch`] before any gateway work if `files` is
    /// empty, with [`QualityError::InvalidMode`] for an unknown mode, and
    /// re-raises gateway failures unchanged — no partial response is ever
    /// synthesized from a failed analysis.
    pub async fn analyze_batch(
        &self,
        files: &[FileInput],
        mode: &str,
    ) -> Result<QualityAnalysisResponse, QualityError> {
        if files.is_empty() {
            return Err(QualityError::EmptyBatch);
        }

        let analysis_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        info!(
            analysis_id = %analysis_id,
            files = files.len(),
            mode = %mode,
            "starting quality analysis"
        );

        // Every started analysis gets a terminal log line keyed by its ID,
        // whether it fails locally or in the gateway.
        let strategy = match resolve_mode(mode) {
            Ok(strategy) => strategy,
            Err(err) => {
                error!(analysis_id = %analysis_id, error = %err, "quality analysis failed");
                return Err(err);
            }
        };

        let raw_issues = match self.analyzer.analyze(files, strategy).await {
            Ok(raw) => raw,
            Err(err) => {
                error!(analysis_id = %analysis_id, error = %err, "quality analysis failed");
                return Err(QualityError::Analyzer(err));
            }
        };

        // Gateway order is preserved end to end.
        let issues: Vec<_> = raw_issues.into_iter().map(convert_issue).collect();
        let summary = summarize(files, &issues);

        info!(
            analysis_id = %analysis_id,
            issues = issues.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "quality analysis completed"
        );

        Ok(QualityAnalysisResponse {
            analysis_id,
            summary,
            issues,
        })
    }

    /// Release gateway resources. Safe to call more than once; after a
    /// successful release, later calls never reach the backend. Latches only
    /// on success so a failed teardown can be retried.
    pub async fn close(&self) -> Result<(), QualityError> {
        if self.closed.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.analyzer.close().await.map_err(QualityError::Analyzer)?;
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Errors returned by the quality analysis service.
#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    #[error("no files provided for analysis")]
    EmptyBatch,
    #[error("invalid mode: {mode}. Must be one of: {allowed}")]
    InvalidMode { mode: String, allowed: String },
    /// Opaque gateway failure, re-raised unchanged.
    #[error(transparent)]
    Analyzer(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalysisStrategy, RawIssue, RawSuggestion};
    use crate::quality::schema::{DetectedBy, FixType, Severity};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Stub gateway returning a fixed issue list and counting invocations.
    struct StubGateway {
        issues: Vec<RawIssue>,
        calls: AtomicUsize,
        close_calls: AtomicUsize,
    }

    impl StubGateway {
        fn with_issues(issues: Vec<RawIssue>) -> Self {
            Self {
                issues,
                calls: AtomicUsize::new(0),
                close_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AnalyzerGateway for StubGateway {
        async fn analyze(
            &self,
            _files: &[FileInput],
            _strategy: AnalysisStrategy,
        ) -> anyhow::Result<Vec<RawIssue>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.issues.clone())
        }

        async fn close(&self) -> anyhow::Result<()> {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingGateway {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalyzerGateway for FailingGateway {
        async fn analyze(
            &self,
            _files: &[FileInput],
            _strategy: AnalysisStrategy,
        ) -> anyhow::Result<Vec<RawIssue>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("llm provider unreachable")
        }

        async fn close(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    /// Fails the first teardown attempt, succeeds afterwards.
    struct FlakyCloseGateway {
        close_calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalyzerGateway for FlakyCloseGateway {
        async fn analyze(
            &self,
            _files: &[FileInput],
            _strategy: AnalysisStrategy,
        ) -> anyhow::Result<Vec<RawIssue>> {
            Ok(Vec::new())
        }

        async fn close(&self) -> anyhow::Result<()> {
            if self.close_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("connection teardown failed")
            }
            Ok(())
        }
    }

    fn sample_issue() -> RawIssue {
        RawIssue {
            file: "tests/test_orders.py".into(),
            line: 18,
            column: 5,
            severity: Severity::Error,
            kind: "assertion-roulette".into(),
            message: "multiple unexplained assertions".into(),
            detected_by: "rule_engine".into(),
            suggestion: Some(RawSuggestion {
                action: "add".into(),
                new_code: "# reason: order total".into(),
                old_code: None,
                explanation: "annotate each assertion".into(),
            }),
        }
    }

    fn batch(n: usize) -> Vec<FileInput> {
        (0..n)
            .map(|i| FileInput::new(format!("tests/test_{i}.py"), "def test(): pass"))
            .collect()
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_the_gateway() {
        let stub = Arc::new(StubGateway::with_issues(vec![sample_issue()]));
        let service = QualityAnalysisService::new(stub.clone());

        let err = service.analyze_batch(&[], "hybrid").await.unwrap_err();
        assert!(matches!(err, QualityError::EmptyBatch));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_mode_is_rejected_before_the_gateway() {
        let stub = Arc::new(StubGateway::with_issues(vec![]));
        let service = QualityAnalysisService::new(stub.clone());

        let err = service
            .analyze_batch(&batch(1), "thorough")
            .await
            .unwrap_err();
        assert!(matches!(err, QualityError::InvalidMode { .. }));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn total_files_tracks_batch_size_not_issue_count() {
        let stub = Arc::new(StubGateway::with_issues(vec![sample_issue()]));
        let service = QualityAnalysisService::new(stub);

        let response = service.analyze_batch(&batch(5), "fast").await.unwrap();
        assert_eq!(response.summary.total_files, 5);
        assert_eq!(response.summary.total_issues, 1);
        assert_eq!(response.summary.critical_issues, 1);
    }

    #[tokio::test]
    async fn issues_are_converted_and_order_preserved() {
        let mut second = sample_issue();
        second.file = "tests/test_refunds.py".into();
        second.severity = Severity::Warning;
        second.detected_by = "llm".into();
        second.suggestion = None;

        let stub = Arc::new(StubGateway::with_issues(vec![sample_issue(), second]));
        let service = QualityAnalysisService::new(stub);

        let response = service.analyze_batch(&batch(2), "hybrid").await.unwrap();
        assert_eq!(response.issues.len(), 2);

        let first = &response.issues[0];
        assert_eq!(first.file_path, "tests/test_orders.py");
        assert_eq!(first.code, "assertion-roulette");
        assert_eq!(first.detected_by, DetectedBy::Rule);
        let fix = first.suggestion.as_ref().unwrap();
        assert_eq!(fix.fix_type, FixType::Insert);
        assert_eq!(fix.new_text, "# reason: order total");

        let last = &response.issues[1];
        assert_eq!(last.file_path, "tests/test_refunds.py");
        assert_eq!(last.detected_by, DetectedBy::Llm);
        assert!(last.suggestion.is_none());
    }

    #[tokio::test]
    async fn analysis_ids_are_unique_per_call() {
        let stub = Arc::new(StubGateway::with_issues(vec![]));
        let service = QualityAnalysisService::new(stub);

        let a = service.analyze_batch(&batch(1), "fast").await.unwrap();
        let b = service.analyze_batch(&batch(1), "fast").await.unwrap();
        assert_ne!(a.analysis_id, b.analysis_id);
    }

    #[tokio::test]
    async fn gateway_failure_propagates_unchanged() {
        let failing = Arc::new(FailingGateway {
            calls: AtomicUsize::new(0),
        });
        let service = QualityAnalysisService::new(failing.clone());

        let err = service.analyze_batch(&batch(1), "deep").await.unwrap_err();
        match err {
            QualityError::Analyzer(inner) => {
                assert_eq!(inner.to_string(), "llm provider unreachable");
            }
            other => panic!("expected Analyzer, got {other:?}"),
        }
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn close_reaches_the_gateway_once() {
        let stub = Arc::new(StubGateway::with_issues(vec![]));
        let service = QualityAnalysisService::new(stub.clone());

        service.close().await.unwrap();
        service.close().await.unwrap();
        assert_eq!(stub.close_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_close_can_be_retried() {
        let flaky = Arc::new(FlakyCloseGateway {
            close_calls: AtomicUsize::new(0),
        });
        let service = QualityAnalysisService::new(flaky.clone());

        // First teardown fails and must not latch the closed flag.
        assert!(service.close().await.is_err());
        service.close().await.expect("retry after failed close");
        service.close().await.expect("closed service stays closed");
        assert_eq!(flaky.close_calls.load(Ordering::SeqCst), 2);
    }
}
