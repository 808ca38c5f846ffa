use crate::cli::ServeArgs;
use crate::infra::{load_hierarchy, AppState};
use crate::routes::with_mcda_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use geocubo::config::AppConfig;
use geocubo::error::AppError;
use geocubo::mcda::HierarchyStore;
use geocubo::telemetry;
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

    let hierarchy = load_hierarchy(config.mcda.hierarchy_path.as_deref())?;
    let store = Arc::new(HierarchyStore::new(hierarchy));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_mcda_routes(store)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "geocubo mcda service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
