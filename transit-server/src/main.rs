use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_server::planner::{JourneyPlanner, PlannerConfig};
use transit_server::provider::{
    CachedProvider, HttpTransitProvider, MockTransitProvider, ProviderCacheConfig, ProviderConfig,
    TransitDataProvider,
};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // A network file serves a fixed snapshot for offline use; otherwise the
    // data comes from the HTTP service named by TRANSIT_API_URL.
    match std::env::var("TRANSIT_NETWORK_FILE") {
        Ok(path) => {
            info!(path = %path, "serving network snapshot from file");
            let provider =
                MockTransitProvider::from_file(&path).expect("Failed to load network file");
            serve(provider).await;
        }
        Err(_) => {
            let base_url = std::env::var("TRANSIT_API_URL")
                .expect("Set TRANSIT_API_URL (or TRANSIT_NETWORK_FILE for a local snapshot)");

            let mut config = ProviderConfig::new(base_url);
            if let Ok(key) = std::env::var("TRANSIT_API_KEY") {
                config = config.with_api_key(key);
            }

            let http = HttpTransitProvider::connect(config)
                .await
                .expect("Failed to connect to transit data service");
            info!(lines = http.lines().len(), "connected to transit data service");

            serve(CachedProvider::new(http, &ProviderCacheConfig::default())).await;
        }
    }
}

async fn serve<P: TransitDataProvider + 'static>(provider: P) {
    let planner = JourneyPlanner::new(provider, PlannerConfig::default());

    // Build the graph up front so the first query doesn't pay for it.
    let stats = planner.rebuild().await;
    info!(
        stops = stats.stops,
        lines = stats.lines,
        failed_fetches = stats.failed_fetches,
        "initial graph ready"
    );

    let app = create_router(AppState::new(planner));

    let port = std::env::var("TRANSIT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!(%addr, "transit journey planner listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
