use std::net::SocketAddr;
use std::sync::Arc;
use std::time::SystemTime;

use axum::{routing::get, Router};

use crate::db::DataAccess;
use crate::startup::StartupState;

mod handlers;
mod models;

use handlers::{health, not_found};

#[derive(Clone)]
pub struct AppState {
    pub data_access: Arc<DataAccess>,
    pub startup_state: StartupState,
    pub started_at: SystemTime,
}

/// Serve the diagnostics/liveness API until the shutdown token fires. This
/// stays up even when startup failed, so the process remains observable.
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 diagnostics API on http://{}", addr);

    let app = Router::new()
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 diagnostics API shutdown requested");
        })
        .await?;
    log::info!("👋 diagnostics API exited");
    Ok(())
}
