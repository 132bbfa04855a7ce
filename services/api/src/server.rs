use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidateRepository};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use investor_match::config::AppConfig;
use investor_match::error::AppError;
use investor_match::matching::MatchmakingService;
use investor_match::registry::RegistryImporter;
use investor_match::telemetry;
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

    let repository = Arc::new(InMemoryCandidateRepository::default());
    let service = Arc::new(MatchmakingService::with_default_top_n(
        repository,
        config.matching.default_top_n,
    ));

    if let Some(path) = &config.matching.registry_csv {
        let candidates = RegistryImporter::from_path(path, Local::now().date_naive())?;
        let loaded = candidates.len();
        for candidate in candidates {
            service.register(candidate)?;
        }
        info!(registry = %path.display(), loaded, "candidate registry loaded");
    }

    let app = with_matching_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "investor matchmaking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
