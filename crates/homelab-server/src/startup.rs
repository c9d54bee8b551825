//! Server startup utilities.

use homelab_config::AppConfig;
use homelab_service::CacheStatus;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    __  __                     __      __
   / / / /___  ____ ___  ___  / /___ _/ /_
  / /_/ / __ \/ __ `__ \/ _ \/ / __ `/ __ \
 / __  / /_/ / / / / / /  __/ / /_/ / /_/ /
/_/ /_/\____/_/ /_/ /_/\___/_/\__,_/_.___/

                Services Catalog
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig, cache: &CacheStatus) {
    let separator = "=".repeat(60);
    let port = config.server.port;
    info!("{}", separator);
    info!("Services API: http://{}/api/services", config.server.addr());
    info!("Health:       http://0.0.0.0:{}/health", port);
    info!("Status:       http://0.0.0.0:{}/api/status", port);
    info!("Database:     {}", config.database.path().display());
    info!(
        "Cache:        {} (enabled: {}, connected: {}, ttl: {}s)",
        cache.backend, cache.enabled, cache.connected, cache.default_ttl_secs
    );
    info!("{}", separator);
}
