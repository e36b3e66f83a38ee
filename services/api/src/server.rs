use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_ordering_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sample_ordering::config::AppConfig;
use sample_ordering::error::AppError;
use sample_ordering::ordering::OrderingService;
use sample_ordering::telemetry;
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

    let ordering_service = Arc::new(OrderingService::new(config.ordering));

    let app = with_ordering_routes(ordering_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        preview_limit = config.ordering.preview_limit,
        max_entities = config.ordering.max_entities,
        "sample ordering service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
