use crate::cli::ServeArgs;
use crate::infra::{build_report, AppState};
use crate::routes::funnel_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hiring_funnel::config::AppConfig;
use hiring_funnel::error::AppError;
use hiring_funnel::telemetry;
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
    args.analysis.apply(&mut config)?;

    telemetry::init(&config.telemetry)?;

    let report = build_report(&config).await?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        report: Arc::new(report),
    };

    let app = funnel_router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        department = %config.funnel.department,
        "hiring funnel service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
