//! Health check endpoints

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health status response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    // Record health check metric
    metrics::counter!("meetolio_health_checks_total").increment(1);

    let (code, status) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
}
