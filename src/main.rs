mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{MetOfficeClient, RingStore, RtdbClient};
use application::{poller, LocationFilter, WeatherService};
use config::Config;
use domain::FetchKind;
use interface::http::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wxproxy={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting wxproxy v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Polling {} every {}s (forecast) / {}s (observations)",
        config.base_url, config.forecast_interval, config.observation_interval
    );

    if config.api_key.is_empty() {
        warn!("⚠ MET_OFFICE_KEY is not set. Upstream fetches will be rejected.");
    }

    // Initialize adapters
    let source =
        Arc::new(MetOfficeClient::new(config.base_url.clone(), config.api_key.clone())?)
            as Arc<dyn ports::WeatherSource>;

    let history = match &config.history_url {
        Some(url) => {
            info!("✓ History store at {}", url);
            Some(Arc::new(RtdbClient::new(url.clone(), config.history_auth.clone())?)
                as Arc<dyn ports::HistoryStore>)
        }
        None => {
            warn!("⚠ WXPROXY_HISTORY_URL not set. Historic persistence disabled.");
            None
        }
    };

    let filter = match &config.locations {
        Some(ids) => {
            info!("Retaining {} allow-listed locations", ids.len());
            LocationFilter::from_ids(ids.iter().cloned())
        }
        None => LocationFilter::All,
    };

    // Create weather service
    let service = Arc::new(WeatherService::new(
        source,
        RingStore::new(config.forecast_capacity),
        RingStore::new(config.observation_capacity),
        history,
        filter,
    ));

    info!("✓ Weather service initialized");

    // Arm the fetch schedules; handles are kept so shutdown stays clean
    let _forecast_poller = poller::spawn(
        service.clone(),
        FetchKind::Forecast,
        Duration::from_secs(config.forecast_interval),
    );
    let _observation_poller = poller::spawn(
        service.clone(),
        FetchKind::Observation,
        Duration::from_secs(config.observation_interval),
    );

    // Create HTTP server
    let app = create_router(service, config.admin_token.clone());
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("✓ wxproxy listening on {}", addr);
    info!("  → Forecast: http://localhost:{}/api/forecast", config.port);
    info!("  → History: http://localhost:{}/api/history", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
