use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryReportRepository};
use crate::routes::with_audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pdf_a11y::audit::{AuditService, VeraPdfChecker};
use pdf_a11y::config::AppConfig;
use pdf_a11y::error::AppError;
use pdf_a11y::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    info!(
        validator = %config.validator.program,
        flavour = %config.validator.flavour,
        timeout_secs = config.validator.timeout.as_secs(),
        "configured PDF/UA validator"
    );
    let checker = Arc::new(VeraPdfChecker::new(config.validator.clone()));
    let repository = Arc::new(InMemoryReportRepository::default());
    let audit_service = Arc::new(AuditService::new(checker, repository));

    let app = with_audit_routes(audit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pdf accessibility auditor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
