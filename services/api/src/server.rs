use crate::cli::ServeArgs;
use crate::infra::{AppState, GameServices};
use crate::routes::with_game_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use catfolio::config::AppConfig;
use catfolio::error::AppError;
use catfolio::settings::{JsonFileSettingsStore, SettingsStore};
use catfolio::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let settings: Arc<dyn SettingsStore> =
        Arc::new(JsonFileSettingsStore::new(config.settings.path.clone()));
    match settings.load() {
        Ok(current) => info!(volume = current.volume.percent(), "player settings loaded"),
        Err(err) => warn!(%err, "player settings unreadable; requests will report the error"),
    }
    let services = GameServices::new(&config.games, settings)?;

    let app = with_game_routes(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded = config.games.seed.is_some(),
        "catfolio game service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
