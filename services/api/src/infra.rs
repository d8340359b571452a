use metrics_exporter_prometheus::PrometheusHandle;
use pdf_a11y::audit::{AuditReport, ReportId, ReportRepository, RepositoryError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct ReportStore {
    reports: HashMap<ReportId, AuditReport>,
    fingerprints: HashMap<String, ReportId>,
}

/// Process-local report storage; doubles as the analysis cache.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReportRepository {
    store: Arc<Mutex<ReportStore>>,
}

impl InMemoryReportRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ReportStore>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("report store poisoned".to_string()))
    }
}

impl ReportRepository for InMemoryReportRepository {
    fn insert(&self, report: AuditReport) -> Result<AuditReport, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.reports.contains_key(&report.report_id) {
            return Err(RepositoryError::Conflict);
        }
        if let Some(fingerprint) = &report.fingerprint {
            guard
                .fingerprints
                .insert(fingerprint.clone(), report.report_id.clone());
        }
        guard
            .reports
            .insert(report.report_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<AuditReport>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.reports.get(id).cloned())
    }

    fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<AuditReport>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .fingerprints
            .get(fingerprint)
            .and_then(|id| guard.reports.get(id))
            .cloned())
    }
}
