use crate::cli::ServeArgs;
use crate::infra::{build_service, AppState, ServiceInputs};
use crate::routes::with_recommendation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use scholar_rank::config::AppConfig;
use scholar_rank::error::AppError;
use scholar_rank::telemetry;
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

    // Urgency is measured against the start-up date for the lifetime of the process.
    let inputs = ServiceInputs {
        applicants: config.ranking.applicants_path.clone(),
        catalog: config.ranking.catalog_path.clone(),
        today: Some(Local::now().date_naive()),
    };
    let service = Arc::new(build_service(&config.ranking, inputs)?);

    let app = with_recommendation_routes(service, config.ranking.top_n)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship recommender ready");

    axum::serve(listener, app).await?;
    Ok(())
}
