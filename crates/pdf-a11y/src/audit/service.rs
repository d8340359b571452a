use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::compliance::{ComplianceChecker, ComplianceError, ComplianceResult};
use super::facts::{is_defined, AnalysisFacts, DocumentMetadata};
use super::levels::{AnalysisLevel, QuickSummary};
use super::recommendations::generate_recommendations;
use super::report::{AuditReport, PdfUaValidation, ReportId, ReportMetadata};
use super::repository::{ReportRepository, RepositoryError};
use super::scoring::calculate_score;

/// Bumped whenever scoring or recommendations change, invalidating cached reports.
pub const CACHE_VERSION: &str = "v1.0";

/// Files above this size are analyzed but never served from or stored as cache.
/// Level limits currently sit at or below it, so it only applies if one is raised.
pub const CACHE_MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Cached reports older than this are recomputed.
pub const CACHE_TTL_SECS: i64 = 3600;

/// Cache key for a document's content hash at a given analysis level.
pub fn fingerprint(content_hash: &str, level: AnalysisLevel) -> String {
    format!("pdf_analysis:{CACHE_VERSION}:{}:{level}", content_hash.trim())
}

/// The analyzed file as seen by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub filename: String,
    pub file_size: u64,
    /// Location handed to the compliance checker when no verdict is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// Request to audit one document from already-extracted facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSubmission {
    pub document: DocumentDescriptor,
    #[serde(default)]
    pub level: AnalysisLevel,
    pub facts: AnalysisFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceResult>,
}

/// Service composing the compliance checker, scoring, recommendations and report storage.
pub struct AuditService<C, R> {
    checker: Arc<C>,
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<C, R> AuditService<C, R>
where
    C: ComplianceChecker + 'static,
    R: ReportRepository + 'static,
{
    pub fn new(checker: Arc<C>, repository: Arc<R>) -> Self {
        Self {
            checker,
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_report_id(&self) -> ReportId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ReportId(format!("audit-{id:06}"))
    }

    /// Audit a document, answering from the report cache when the content was seen before.
    pub async fn submit(&self, submission: AuditSubmission) -> Result<AuditReport, AuditError> {
        let AuditSubmission {
            document,
            level,
            facts,
            metadata,
            compliance,
        } = submission;
        let config = level.config();

        if document.file_size > config.max_file_size_bytes() {
            warn!(
                filename = %document.filename,
                file_size = document.file_size,
                %level,
                "document rejected: too large for analysis level"
            );
            return Err(AuditError::FileTooLarge {
                file_size: document.file_size,
                limit_mb: config.max_file_size_mb,
                level,
            });
        }

        let facts = match &metadata {
            Some(metadata) => facts.with_document_metadata(metadata),
            None => facts,
        };

        // Submissions carrying their own verdict neither read nor populate the cache.
        let fingerprint = document
            .content_hash
            .as_deref()
            .filter(|hash| is_defined(Some(*hash)))
            .filter(|_| document.file_size <= CACHE_MAX_FILE_SIZE_BYTES)
            .filter(|_| compliance.is_none())
            .map(|hash| fingerprint(hash, level));

        if let Some(key) = &fingerprint {
            if let Some(cached) = self.repository.find_by_fingerprint(key)? {
                if is_reusable(&cached, &facts) {
                    info!(report_id = %cached.report_id, fingerprint = %key, "serving cached audit report");
                    return Ok(cached);
                }
                debug!(report_id = %cached.report_id, fingerprint = %key, "cached report stale or built from other facts");
            }
        }

        let mut report = AuditReport {
            report_id: self.next_report_id(),
            fingerprint,
            metadata: ReportMetadata {
                filename: document.filename.clone(),
                analysis_date: Utc::now(),
                file_size: document.file_size,
                analysis_level: level,
            },
            facts,
            pdf_ua_validation: None,
            accessibility_score: None,
            recommendations: Vec::new(),
            quick_summary: None,
        };

        if config.skip_compliance {
            report.quick_summary = Some(QuickSummary::from_facts(&report.facts));
        } else {
            let compliance = match compliance {
                Some(result) => result,
                None => {
                    let path = document.path.as_deref().ok_or(AuditError::MissingDocument)?;
                    debug!(path = %path.display(), "running compliance checker");
                    self.checker.check(path).await?
                }
            };

            report.accessibility_score =
                Some(calculate_score(&report.facts, compliance.is_compliant));
            report.recommendations =
                generate_recommendations(&report.facts, &compliance.failed_rules);
            report.pdf_ua_validation = Some(PdfUaValidation::from_result(
                compliance,
                config.failed_rules_shown,
            ));
        }

        let stored = self.repository.insert(report)?;
        info!(
            report_id = %stored.report_id,
            filename = %stored.metadata.filename,
            %level,
            percentage = stored.accessibility_score.as_ref().map(|score| score.percentage),
            recommendations = stored.recommendations.len(),
            "audit report stored"
        );
        Ok(stored)
    }

    /// Fetch a stored report for API responses.
    pub fn get(&self, report_id: &ReportId) -> Result<AuditReport, AuditError> {
        let report = self
            .repository
            .fetch(report_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(report)
    }
}

fn is_reusable(cached: &AuditReport, facts: &AnalysisFacts) -> bool {
    let age = Utc::now().signed_duration_since(cached.metadata.analysis_date);
    cached.facts == *facts && age < Duration::seconds(CACHE_TTL_SECS)
}

/// Error raised by the audit service.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("file is {file_size} bytes, above the {limit_mb} MB limit for {level} analysis")]
    FileTooLarge {
        file_size: u64,
        limit_mb: u64,
        level: AnalysisLevel,
    },
    #[error("no PDF/UA verdict supplied and no document path to validate")]
    MissingDocument,
    #[error(transparent)]
    Compliance(#[from] ComplianceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AuditError {
    pub const fn code(&self) -> &'static str {
        match self {
            AuditError::FileTooLarge { .. } => "ERR_FILE_TOO_LARGE",
            AuditError::MissingDocument => "ERR_MISSING_DOCUMENT",
            AuditError::Compliance(err) => err.code(),
            AuditError::Repository(err) => err.code(),
        }
    }
}
