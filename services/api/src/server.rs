use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredRecorder};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use eva_core::assessment::{AssessmentService, QuestionBank, ScoringConfig};
use eva_core::config::AppConfig;
use eva_core::error::AppError;
use eva_core::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let recorder = ConfiguredRecorder::from_config(&config.submissions)?;
    let recorder_kind = recorder.describe();
    let bank = QuestionBank::reference();
    let question_count = bank.len();
    let service = Arc::new(AssessmentService::new(
        bank,
        ScoringConfig::reference(),
        Arc::new(recorder),
    ));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        questions = question_count,
        recorder = recorder_kind,
        "assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
