use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::config::ServerConfig;
use metro_server::network::NetworkHandle;
use metro_server::planner::PlannerConfig;
use metro_server::stations::ResolverConfig;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // Fail fast if the network cannot be built
    info!(path = %config.network_path.display(), "Loading network definition");
    let network = NetworkHandle::from_file(&config.network_path).expect("Failed to load network");

    let state = AppState::new(network, PlannerConfig::default(), ResolverConfig::default());

    // Periodically re-read the definition file
    if let Some(period) = config.reload_interval {
        let network = Arc::clone(&state.network);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                if let Err(e) = Arc::clone(&network).reload_blocking().await {
                    error!(error = %e, "Failed to reload network, keeping current graph");
                }
            }
        });
    }

    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Metro route planner listening on http://{addr}");
    info!("  GET  /health                     - Health check");
    info!("  GET  /api/stations/resolve?q=    - Resolve a station name");
    info!("  GET  /api/stations/search?q=     - Fuzzy station search");
    info!("  GET  /api/stations/autocomplete  - Complete a station name");
    info!("  GET  /api/stations/nearby        - Stations near a point");
    info!("  GET  /api/lines                  - List lines");
    info!("  POST /api/route                  - Plan a route");
    info!("  GET  /api/reachability           - Check two stations are connected");
    info!("  POST /api/network/reload         - Reload the network definition");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
