use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sem_lite::config::AppConfig;
use sem_lite::error::AppError;
use sem_lite::telemetry;
use sem_lite::workflows::dashboard::{DemoQueryFactory, GoogleAdsQueryFactory};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if args.demo {
        config.demo_mode = true;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let routes = if config.demo_mode {
        warn!("demo mode enabled: serving fixture data, not the live reporting API");
        with_dashboard_routes(Arc::new(DemoQueryFactory))
    } else {
        if config.google_ads.developer_token.is_none() {
            warn!("GOOGLE_ADS_DEVELOPER_TOKEN is not set; reporting endpoints will fail");
        }
        let factory = GoogleAdsQueryFactory::new(config.google_ads.clone())?;
        with_dashboard_routes(Arc::new(factory))
    };

    let app = routes
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, demo_mode = config.demo_mode, "search marketing dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
