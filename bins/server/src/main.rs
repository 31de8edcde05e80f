//! Landmark API Server
//!
//! Main entry point for the resource service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use landmark_api::{AppState, create_router};
use landmark_core::storage::{StorageConfig, StorageService};
use landmark_db::RecordStore;
use landmark_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "landmark=debug,landmark_api=debug,landmark_core=debug,\
                     landmark_db=debug,tower_http=debug"
                        .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Record store: Postgres when a URL is configured, memory otherwise
    let store = RecordStore::from_config(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(backend = store.backend_name(), "Record store ready");

    // Object storage
    let storage_config =
        StorageConfig::from_settings(&config.storage).context("Invalid storage configuration")?;
    let storage = StorageService::from_config(storage_config)
        .context("Failed to initialize object storage")?;
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        namespace = %config.storage.namespace,
        "Object storage configured"
    );

    let state = AppState::new(store, storage, config.storage.namespace.clone());
    let app = create_router(state, config.server.max_body_bytes);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
