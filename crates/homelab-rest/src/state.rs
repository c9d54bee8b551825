//! Application state for Axum handlers.

use homelab_core::HealthCheck;
use homelab_service::{CacheInterface, ServiceUseCases};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub use_cases: Arc<dyn ServiceUseCases>,
    pub cache: Arc<dyn CacheInterface>,
    pub database: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        use_cases: Arc<dyn ServiceUseCases>,
        cache: Arc<dyn CacheInterface>,
        database: Arc<dyn HealthCheck>,
    ) -> Self {
        Self {
            use_cases,
            cache,
            database,
        }
    }
}
