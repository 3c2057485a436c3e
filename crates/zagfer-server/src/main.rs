//! ZAGFER server entry point.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use zagfer_server::{AppState, build_router};
use zagfer_storage::{Database, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_path =
        std::env::var("ZAGFER_DATABASE").unwrap_or_else(|_| "zagfer.db".to_string());
    let addr = std::env::var("ZAGFER_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());

    tracing::info!(database = %database_path, "opening database");
    let db = Database::new(DatabaseConfig::new(&database_path))
        .await
        .context("database initialization failed")?;

    let store = zagfer_storage::SqliteStore::new(db.pool().clone());
    let state = AppState::new(store).context("state initialization failed")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "ZAGFER server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server shut down");
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(%err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
