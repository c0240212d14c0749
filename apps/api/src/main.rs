//! Wayfare API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use tracing::{info, warn};
use wayfare_core::AppError;
use wayfare_infrastructure::InMemoryStore;

use crate::api_config::{ApiConfig, StorageBackend, init_tracing};
use crate::api_services::{
    StoragePorts, build_app_state, build_identity_provider, connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let storage = match &config.storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = connect_and_migrate(database_url, *max_connections).await?;
            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }
            StoragePorts::postgres(&pool)
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
            StoragePorts::in_memory(Arc::new(InMemoryStore::new()))
        }
    };

    let app_state = build_app_state(storage, build_identity_provider(&config)?);
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "wayfare-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
