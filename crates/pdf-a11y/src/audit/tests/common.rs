use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::audit::compliance::{
    ComplianceChecker, ComplianceError, ComplianceResult, FailedRule,
};
use crate::audit::facts::{AnalysisFacts, HeadingInfo, ImageInfo};
use crate::audit::levels::AnalysisLevel;
use crate::audit::report::{AuditReport, ReportId};
use crate::audit::repository::{ReportRepository, RepositoryError};
use crate::audit::service::{AuditService, AuditSubmission, DocumentDescriptor};

pub(super) fn perfect_facts() -> AnalysisFacts {
    AnalysisFacts {
        is_tagged: true,
        contains_text: true,
        is_title_defined: true,
        is_lang_defined: true,
        heading_info: Some(HeadingInfo::from_levels([1, 2, 2, 3])),
        image_info: ImageInfo::new(4, 4),
    }
}

pub(super) fn worst_facts() -> AnalysisFacts {
    AnalysisFacts {
        is_tagged: false,
        contains_text: false,
        is_title_defined: false,
        is_lang_defined: false,
        heading_info: Some(HeadingInfo {
            h1_count: 0,
            has_single_h1: false,
            has_skipped_levels: true,
            heading_structure: Vec::new(),
            issues: vec!["No H1 heading found".to_string()],
        }),
        image_info: ImageInfo::new(6, 0),
    }
}

pub(super) fn failed_rules(count: usize) -> Vec<FailedRule> {
    (1..=count)
        .map(|index| {
            FailedRule::new(
                "ISO 14289-1:2014",
                format!("7.{index}"),
                index.to_string(),
                format!("Rule {index} failed"),
            )
        })
        .collect()
}

pub(super) fn document(file_size: u64) -> DocumentDescriptor {
    DocumentDescriptor {
        filename: "annual-report.pdf".to_string(),
        file_size,
        path: Some(PathBuf::from("/srv/uploads/annual-report.pdf")),
        content_hash: Some("9e107d9d372bb6826bd81d3542a419d6".to_string()),
    }
}

pub(super) fn submission(level: AnalysisLevel) -> AuditSubmission {
    AuditSubmission {
        document: document(2 * 1024 * 1024),
        level,
        facts: perfect_facts(),
        metadata: None,
        compliance: None,
    }
}

pub(super) fn build_service(
    verdict: ComplianceResult,
) -> (
    AuditService<RecordingChecker, MemoryRepository>,
    Arc<MemoryRepository>,
    Arc<RecordingChecker>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let checker = Arc::new(RecordingChecker::new(verdict));
    let service = AuditService::new(checker.clone(), repository.clone());
    (service, repository, checker)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) reports: Arc<Mutex<HashMap<ReportId, AuditReport>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.reports.lock().expect("repository mutex poisoned").len()
    }
}

impl ReportRepository for MemoryRepository {
    fn insert(&self, report: AuditReport) -> Result<AuditReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("repository mutex poisoned");
        if guard.contains_key(&report.report_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(report.report_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<AuditReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<AuditReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|report| report.fingerprint.as_deref() == Some(fingerprint))
            .max_by(|left, right| left.report_id.0.cmp(&right.report_id.0))
            .cloned())
    }
}

pub(super) struct UnavailableRepository;

impl ReportRepository for UnavailableRepository {
    fn insert(&self, _report: AuditReport) -> Result<AuditReport, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ReportId) -> Result<Option<AuditReport>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_fingerprint(
        &self,
        _fingerprint: &str,
    ) -> Result<Option<AuditReport>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct RecordingChecker {
    verdict: ComplianceResult,
    calls: AtomicUsize,
    documents: Mutex<Vec<PathBuf>>,
}

impl RecordingChecker {
    pub(super) fn new(verdict: ComplianceResult) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
            documents: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn documents(&self) -> Vec<PathBuf> {
        self.documents.lock().expect("checker mutex poisoned").clone()
    }
}

#[async_trait]
impl ComplianceChecker for RecordingChecker {
    async fn check(&self, document: &Path) -> Result<ComplianceResult, ComplianceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents
            .lock()
            .expect("checker mutex poisoned")
            .push(document.to_path_buf());
        Ok(self.verdict.clone())
    }
}

pub(super) struct TimedOutChecker;

#[async_trait]
impl ComplianceChecker for TimedOutChecker {
    async fn check(&self, _document: &Path) -> Result<ComplianceResult, ComplianceError> {
        Err(ComplianceError::Timeout { seconds: 120 })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
