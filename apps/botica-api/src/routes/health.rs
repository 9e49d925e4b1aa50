//! Liveness plus a store ping.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(check))
}

pub async fn check(State(state): State<AppState>) -> Result<ApiResponse<HealthStatus>, ApiError> {
    if !state.db.health_check().await {
        warn!("Health check failed: database unreachable");
        return Err(ApiError::internal("Database unreachable"));
    }

    Ok(ApiResponse::data(HealthStatus {
        status: "ok",
        database: "up",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
