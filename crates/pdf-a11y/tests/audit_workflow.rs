//! Integration scenarios for the audit workflow.
//!
//! Everything goes through the public service facade and HTTP router: facts in, scored
//! report with recommendations out, with the validator replaced by a canned verdict.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use pdf_a11y::audit::{
        AnalysisFacts, AnalysisLevel, AuditReport, AuditService, AuditSubmission,
        ComplianceResult, DocumentDescriptor, FailedRule, HeadingInfo, ImageInfo, ReportId,
        ReportRepository, RepositoryError, StaticComplianceChecker,
    };

    pub(super) type Service = AuditService<StaticComplianceChecker, MemoryRepository>;

    pub(super) fn brochure_facts() -> AnalysisFacts {
        AnalysisFacts {
            is_tagged: true,
            contains_text: true,
            is_title_defined: true,
            is_lang_defined: false,
            heading_info: Some(HeadingInfo::from_levels([1, 2, 4])),
            image_info: ImageInfo::new(10, 7),
        }
    }

    pub(super) fn verapdf_failures() -> Vec<FailedRule> {
        vec![
            FailedRule::new(
                "ISO 14289-1:2014",
                "7.1",
                "3",
                "Content shall be marked as Artifact or tagged as real content",
            ),
            FailedRule::new(
                "ISO 14289-1:2014",
                "7.3",
                "1",
                "Figure tags shall include an alternative representation",
            ),
            FailedRule::new("ISO 14289-1:2014", "7.18.1", "4", "Form fields shall have a TU entry"),
            FailedRule::new("ISO 14289-1:2014", "7.21.4.1", "1", "Fonts shall be embedded"),
        ]
    }

    pub(super) fn submission(level: AnalysisLevel) -> AuditSubmission {
        AuditSubmission {
            document: DocumentDescriptor {
                filename: "brochure.pdf".to_string(),
                file_size: 3 * 1024 * 1024,
                path: Some("/tmp/brochure.pdf".into()),
                content_hash: Some("d41d8cd98f00b204e9800998ecf8427e".to_string()),
            },
            level,
            facts: brochure_facts(),
            metadata: None,
            compliance: None,
        }
    }

    pub(super) fn service(verdict: ComplianceResult) -> Service {
        AuditService::new(
            Arc::new(StaticComplianceChecker::new(verdict)),
            Arc::new(MemoryRepository::default()),
        )
    }

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        reports: Mutex<HashMap<ReportId, AuditReport>>,
    }

    impl ReportRepository for MemoryRepository {
        fn insert(&self, report: AuditReport) -> Result<AuditReport, RepositoryError> {
            let mut guard = self.reports.lock().expect("repository mutex poisoned");
            guard.insert(report.report_id.clone(), report.clone());
            Ok(report)
        }

        fn fetch(&self, id: &ReportId) -> Result<Option<AuditReport>, RepositoryError> {
            Ok(self
                .reports
                .lock()
                .expect("repository mutex poisoned")
                .get(id)
                .cloned())
        }

        fn find_by_fingerprint(
            &self,
            fingerprint: &str,
        ) -> Result<Option<AuditReport>, RepositoryError> {
            Ok(self
                .reports
                .lock()
                .expect("repository mutex poisoned")
                .values()
                .find(|report| report.fingerprint.as_deref() == Some(fingerprint))
                .cloned())
        }
    }
}

use std::sync::Arc;

use axum::http::StatusCode;
use common::*;
use pdf_a11y::audit::{
    audit_router, AccessibilityLevel, AnalysisLevel, ComplianceResult, Criterion, Priority,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn brochure_audit_scores_and_prioritizes_fixes() {
    let service = service(ComplianceResult::non_compliant(verapdf_failures()));

    let report = service
        .submit(submission(AnalysisLevel::Standard))
        .await
        .expect("audit succeeds");

    let score = report.accessibility_score.as_ref().expect("scored");
    // 15 + 10 + 5 (title only) + 11 (single H1, skipped level) + 14 (7/10 alt) + 0
    assert_eq!(score.total_score, 55);
    assert_eq!(score.level, AccessibilityLevel::Low);
    assert_eq!(
        score
            .criterion(Criterion::HeadingStructure)
            .map(|detail| detail.points),
        Some(11)
    );

    let issues: Vec<_> = report
        .recommendations
        .iter()
        .map(|recommendation| (recommendation.priority, recommendation.issue.as_str()))
        .collect();
    assert_eq!(
        issues,
        vec![
            (Priority::High, "Missing alternative text for 3 images"),
            (Priority::Medium, "Document language is not defined"),
            (
                Priority::Medium,
                "Incorrect heading hierarchy: Skipped heading level: H2 → H4"
            ),
            (
                Priority::Medium,
                "PDF/UA violation: Content shall be marked as Artifact or tagged as real content"
            ),
            (
                Priority::Medium,
                "PDF/UA violation: Figure tags shall include an alternative representation"
            ),
            (Priority::Medium, "PDF/UA violation: Form fields shall have a TU entry"),
            (Priority::Low, "1 more PDF/UA rule failed"),
        ]
    );

    let view = report.status_view();
    assert_eq!(view.percentage, Some(55));
    assert_eq!(view.accessibility_level, Some("Low"));
    assert_eq!(view.recommendations.high, 1);
    assert_eq!(view.recommendations.total(), 7);
}

#[tokio::test]
async fn audits_round_trip_through_the_http_router() {
    let router = audit_router(Arc::new(service(ComplianceResult::compliant())));
    let body = serde_json::to_vec(&submission(AnalysisLevel::Professional)).expect("serialize");

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/audits")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    let report_id = created["report_id"].as_str().expect("report id").to_string();

    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/audits/{report_id}"))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json(response).await;

    assert_eq!(fetched, created);
    assert_eq!(fetched["metadata"]["filename"], json!("brochure.pdf"));
    assert_eq!(fetched["pdf_ua_validation"]["is_compliant"], json!(true));
    assert_eq!(fetched["accessibility_score"]["total_score"], json!(85));
}

#[tokio::test]
async fn quick_scan_needs_no_validator() {
    let service = service(ComplianceResult::non_compliant(verapdf_failures()));
    let mut submission = submission(AnalysisLevel::Quick);
    submission.document.path = None;

    let report = service.submit(submission).await.expect("quick scan");

    let summary = report.quick_summary.expect("summary");
    assert!(summary.accessible);
    assert_eq!(summary.quick_score, 100);
    assert!(report.pdf_ua_validation.is_none());
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
