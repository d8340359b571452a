//! Accessibility audit of PDF documents: weighted scoring, prioritized remediation
//! recommendations, PDF/UA validation and the service that assembles them into reports.
//!
//! Scoring and recommendations are pure functions over [`AnalysisFacts`]; everything that
//! touches the outside world (the validator process, report storage) sits behind a trait.

pub mod compliance;
pub mod facts;
pub mod levels;
pub mod recommendations;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;


pub use compliance::{
    parse_verapdf_report, ComplianceChecker, ComplianceError, ComplianceResult, FailedRule,
    StaticComplianceChecker, VeraPdfChecker,
};
pub use facts::{AnalysisFacts, DocumentMetadata, HeadingInfo, ImageInfo};
pub use levels::{AnalysisLevel, LevelConfig, QuickSummary};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use report::{
    AuditReport, AuditStatusView, PdfUaValidation, RecommendationCounts, ReportId,
    ReportMetadata,
};
pub use repository::{ReportRepository, RepositoryError};
pub use router::audit_router;
pub use scoring::{
    calculate_score, AccessibilityLevel, Criterion, CriterionScore, ScoreReport, MAX_SCORE,
};
pub use service::{
    fingerprint, AuditError, AuditService, AuditSubmission, DocumentDescriptor,
    CACHE_MAX_FILE_SIZE_BYTES, CACHE_TTL_SECS, CACHE_VERSION,
};
