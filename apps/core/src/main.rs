// MindFlow Backend Entry Point
// Wellness API: sentiment analysis, journaling, moods, games and AI chat

mod actors;
mod api;
mod brain;
mod config;
mod database;
mod error;
mod fs_manager;
mod models;
mod stats;
mod telemetry;

#[cfg(test)]
mod tests;

use actors::llm::LlmActorHandle;
use actors::therapist::Therapist;
use anyhow::Context;
use api::AppState;
use brain::SentimentAnalyzer;
use config::AppConfig;
use fs_manager::PortablePathManager;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    telemetry::init(config.log_format);

    info!("Starting MindFlow backend...");

    PortablePathManager::ensure_database_dir(&config.database_url)
        .context("Failed to create the database directory")?;
    let pool = database::init_db(&config.database_url)
        .await
        .context("Failed to initialize the database")?;

    let llm = LlmActorHandle::new(config.llm.clone());
    let therapist = Therapist::new(Arc::new(llm)).with_temperature(config.llm.temperature);

    let state = AppState::new(pool.clone(), SentimentAnalyzer::new(), therapist);
    let app = api::router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("MindFlow backend stopped");
    Ok(())
}

/// Resolves on CTRL+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for CTRL+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received CTRL+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
