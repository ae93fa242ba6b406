mod config;
mod errors;
mod export;
mod resume;
mod routes;
mod snapshot;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::letter_page_config;
use crate::resume::session::ResumeSession;
use crate::routes::build_router;
use crate::snapshot::{SnapshotStore, SnapshotWriter};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Restore the last snapshot, or start from the empty résumé
    let snapshots = SnapshotStore::new(&config.data_dir);
    let initial = snapshots.load();
    let (writer, writer_handle) = SnapshotWriter::spawn(snapshots.clone());
    info!("Snapshot file: {}", snapshots.path().display());

    let page_config = letter_page_config(config.export_font);
    info!(
        "Print page config: {:?} {}pt, {} lines per page",
        page_config.font, page_config.font_size_pt, page_config.usable_height_lines
    );

    let state = AppState {
        session: Arc::new(ResumeSession::new(initial, writer)),
        config: config.clone(),
        page_config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it the last snapshot sender) is gone; wait for the final write.
    if let Err(e) = writer_handle.await {
        warn!("Snapshot writer did not shut down cleanly: {e}");
    }
    info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
