use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use metro_server::network::{NetworkConfig, load_network};
use metro_server::web::{AppState, create_router};

/// Address used when `METRO_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = NetworkConfig::from_env().expect("Invalid network configuration");

    // Load the network (fail fast if the records are unusable)
    info!(
        stations = %config.stations_path.display(),
        edges = %config.edges_path.display(),
        "Loading network"
    );
    let network = load_network(&config).expect("Failed to load network");

    let state = AppState::new(network, config);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("METRO_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .expect("METRO_ADDR is not a socket address");

    info!(%addr, "Metro network server listening");
    info!("  GET  /health                 - Health check");
    info!("  GET  /stations               - Station names");
    info!("  GET  /network                - Network summary");
    info!("  GET  /network/spanning-tree  - Minimum spanning tree");
    info!("  POST /network/reload         - Reload records");
    info!("  POST /journey/plan           - Plan a journey");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
