//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use homelab_core::HealthStatus;
use homelab_service::CacheStatus;
use serde::Serialize;
use tracing::warn;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: &'static str,
}

/// Database section of the status report.
#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub connected: bool,
}

/// Status report for operators.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub cache: CacheStatus,
    pub database: DatabaseStatus,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/api/status", get(status))
}

/// Liveness: the process is serving requests.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "UP" })
}

/// Readiness: the database answers.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if let HealthStatus::Unhealthy(reason) = state.database.check().await {
        warn!("Not ready, {} check failed: {}", state.database.name(), reason);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse { status: "NOT_READY" }),
        );
    }

    (StatusCode::OK, Json(HealthResponse { status: "READY" }))
}

/// Cache and database connectivity snapshot.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let database = DatabaseStatus {
        connected: state.database.check().await.is_healthy(),
    };

    Json(StatusResponse {
        status: "UP",
        cache: state.cache.status(),
        database,
    })
}
