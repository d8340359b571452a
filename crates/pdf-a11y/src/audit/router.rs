use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::compliance::ComplianceChecker;
use super::levels::{AnalysisLevel, LevelConfig};
use super::report::ReportId;
use super::repository::{ReportRepository, RepositoryError};
use super::service::{AuditError, AuditService, AuditSubmission};

/// Router builder exposing HTTP endpoints for audit submission and lookup.
pub fn audit_router<C, R>(service: Arc<AuditService<C, R>>) -> Router
where
    C: ComplianceChecker + 'static,
    R: ReportRepository + 'static,
{
    Router::new()
        .route("/api/v1/audits", post(submit_handler::<C, R>))
        .route("/api/v1/audits/:report_id", get(report_handler::<C, R>))
        .route("/api/v1/analysis-levels", get(levels_handler))
        .with_state(service)
}

pub(crate) async fn submit_handler<C, R>(
    State(service): State<Arc<AuditService<C, R>>>,
    axum::Json(submission): axum::Json<AuditSubmission>,
) -> Response
where
    C: ComplianceChecker + 'static,
    R: ReportRepository + 'static,
{
    match service.submit(submission).await {
        Ok(report) => (StatusCode::CREATED, axum::Json(report)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn report_handler<C, R>(
    State(service): State<Arc<AuditService<C, R>>>,
    Path(report_id): Path<String>,
) -> Response
where
    C: ComplianceChecker + 'static,
    R: ReportRepository + 'static,
{
    let id = ReportId(report_id);
    match service.get(&id) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AuditError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("report {id} not found"),
                "code": RepositoryError::NotFound.code(),
                "report_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(&other),
    }
}

pub(crate) async fn levels_handler() -> axum::Json<Vec<LevelConfig>> {
    axum::Json(
        AnalysisLevel::ordered()
            .into_iter()
            .map(AnalysisLevel::config)
            .collect(),
    )
}

fn error_response(error: &AuditError) -> Response {
    let status = match error {
        AuditError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        AuditError::MissingDocument => StatusCode::UNPROCESSABLE_ENTITY,
        AuditError::Compliance(_) => StatusCode::BAD_GATEWAY,
        AuditError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AuditError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
        "code": error.code(),
    });
    (status, axum::Json(payload)).into_response()
}
