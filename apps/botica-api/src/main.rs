//! # Botica API Server
//!
//! ```text
//! startup:  tracing ─► AppConfig ─► Database (+migrations) ─► bind ─► serve
//! shutdown: Ctrl+C / SIGTERM ─► drain in-flight requests ─► close pool
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use botica_api::{build_router, AppConfig, AppState};
use botica_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,botica=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();

    info!("Starting Botica API server...");

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        addr = %config.server.bind_address(),
        db = %config.database.path,
        units = config.catalog.units.len(),
        locations = config.catalog.locations.len(),
        "Configuration loaded"
    );

    // Connect to database
    let db = Database::new(config.database.to_db_config())
        .await
        .context("Failed to open database")?;
    let (total, applied) = db
        .migration_status()
        .await
        .context("Failed to read migration status")?;
    info!(migrations = total, applied, "Database ready");

    let state = AppState::new(db.clone(), config.catalog.clone());
    let app = build_router(state);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
