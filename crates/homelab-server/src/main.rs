//! # Homelab Services Catalog Server
//!
//! Serves the services catalog over HTTP with SQLite persistence and an
//! optional Redis or in-memory response cache.

use homelab_config::{ConfigLoader, ObservabilityConfig};
use homelab_core::{HomelabError, HomelabResult};
use homelab_server::{
    logging::init_logging,
    shutdown::shutdown_signal,
    startup::{print_banner, print_startup_info},
    AppContainer,
};
use tracing::{error, info};

/// Overrides the configuration directory.
const CONFIG_DIR_VAR: &str = "HOMELAB_CONFIG_DIR";

#[tokio::main]
async fn main() {
    let config_dir = std::env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| "./config".to_string());

    let loader = match ConfigLoader::new(&config_dir) {
        Ok(loader) => loader,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&loader).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(loader: &ConfigLoader) -> HomelabResult<()> {
    let config = loader.get();
    init_logging(&config.observability);

    print_banner();
    info!("Starting Homelab Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let container = AppContainer::initialize(config).await?;
    print_startup_info(config, &container.cache().status());

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HomelabError::internal(format!("Failed to bind {}: {}", addr, e)))?;
    info!("HTTP server listening on {}", addr);

    let served = axum::serve(listener, container.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HomelabError::internal(format!("Server error: {}", e)));

    container.close().await;
    info!("Server shutdown complete");
    served
}
