//! Witness API
//!
//! REST API for browsing project photos stored in Google Drive

use anyhow::{Context, Result};
use drive_client::DriveConnector;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use witness_api::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "witness_api=debug,drive_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Witness API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Drive API URL: {}", config.drive_api_url);
    info!("Root folder: {}", config.root_folder_id);
    info!("Configured projects: {}", config.projects.len());

    // Initialize the Drive connector
    let connector = DriveConnector::new(config.drive_api_url.clone(), config.service_account.clone())
        .context("Failed to initialize Drive client")?;
    info!("Using service account {}", connector.service_account());

    // Create application state
    let state = AppState {
        connector: Arc::new(connector),
        root_folder_id: config.root_folder_id.clone(),
        projects: config.projects.clone(),
    };

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = config.api_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Witness API running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
