use crate::cli::ServeArgs;
use crate::infra::{build_notifier, load_catalog, AppState};
use crate::routes::with_profitability_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rent_to_sa::config::AppConfig;
use rent_to_sa::error::AppError;
use rent_to_sa::telemetry;
use rent_to_sa::workflows::profitability::ProfitabilityService;
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

    let catalog = Arc::new(load_catalog(&config.rates, None)?);
    let notifier = build_notifier(&config.notifications)?;
    let service = Arc::new(ProfitabilityService::new(catalog, notifier));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_profitability_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rent-to-sa profitability service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
