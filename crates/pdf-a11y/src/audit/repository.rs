use super::report::{AuditReport, ReportId};

/// Storage abstraction so the audit service can be exercised in isolation.
///
/// Reports carrying a fingerprint double as the analysis cache: a later submission
/// of the same content at the same level is answered from storage.
pub trait ReportRepository: Send + Sync {
    fn insert(&self, report: AuditReport) -> Result<AuditReport, RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<AuditReport>, RepositoryError>;
    fn find_by_fingerprint(&self, fingerprint: &str)
        -> Result<Option<AuditReport>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("report already exists")]
    Conflict,
    #[error("report not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub const fn code(&self) -> &'static str {
        match self {
            RepositoryError::Conflict => "ERR_REPORT_CONFLICT",
            RepositoryError::NotFound => "ERR_REPORT_NOT_FOUND",
            RepositoryError::Unavailable(_) => "ERR_REPOSITORY_UNAVAILABLE",
        }
    }
}
