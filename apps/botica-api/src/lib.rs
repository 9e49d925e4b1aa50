//! # Botica API
//!
//! REST server for pharmacy inventory and supplier quotations.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Botica API Server                                │
//! │                                                                         │
//! │  Client ───► HTTP (3000) ───► routes ───► services ───► SQLite         │
//! │                  │                           │                          │
//! │            CORS + Trace                botica-core rules                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is built here so integration tests can drive it in-process
//! with `tower::ServiceExt::oneshot`.

pub mod config;
pub mod dto;
pub mod error;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::inventory::routes())
        .merge(routes::quotation::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
