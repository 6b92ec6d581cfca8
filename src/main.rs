//! ticket-tracker server entry point.
//!
//! Starts the Axum HTTP server with the ticket REST endpoints.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ticket_tracker::api;
use ticket_tracker::app_state::AppState;
use ticket_tracker::config::{LogFormat, TrackerConfig};
use ticket_tracker::persistence::{MemoryTicketStore, PostgresTicketStore, TicketStore};
use ticket_tracker::service::TicketService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = TrackerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting ticket-tracker");

    // Build persistence layer
    let store: Arc<dyn TicketStore> = if config.persistence_enabled {
        let postgres = PostgresTicketStore::connect_lazy(&config)?;
        if config.run_migrations {
            postgres.migrate().await?;
            tracing::info!("database migrations applied");
        }
        Arc::new(postgres)
    } else {
        tracing::warn!("persistence disabled; tickets are kept in memory only");
        Arc::new(MemoryTicketStore::new())
    };

    // Build application state
    let app_state = AppState::new(TicketService::new(store));

    // Build router
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
