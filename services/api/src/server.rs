use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryOrderRepository};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use homeservices::access::AccessDecisionEngine;
use homeservices::config::AppConfig;
use homeservices::error::AppError;
use homeservices::orders::OrderService;
use homeservices::status::StatusRegistry;
use homeservices::telemetry;
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

    let registry = StatusRegistry::new(config.locale);
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        registry,
        engine: Arc::new(AccessDecisionEngine::new(config.access.clone())),
    };

    let repository = Arc::new(InMemoryOrderRepository::default());
    let order_service = Arc::new(OrderService::new(repository, registry));

    let app = with_marketplace_routes(order_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        locale = registry.locale().as_str(),
        "home services marketplace ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
