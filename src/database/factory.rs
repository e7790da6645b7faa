// ABOUTME: Connection store factory selecting the backend from configuration
// ABOUTME: Returns a shared trait object so routes stay storage-agnostic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ConnectionStore, Database, RestConnectionStore};
use crate::config::{ServerConfig, StoreBackend};
use crate::errors::AppResult;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// Create the configured connection store
///
/// # Errors
///
/// Returns an error if the REST store lacks its key or the `SQLite` database
/// cannot be opened and migrated
pub async fn create_store(
    config: &ServerConfig,
    client: Client,
) -> AppResult<Arc<dyn ConnectionStore>> {
    let store: Arc<dyn ConnectionStore> = match &config.store {
        StoreBackend::Rest => Arc::new(RestConnectionStore::new(&config.backend, client)?),
        StoreBackend::Sqlite { database_url } => Arc::new(Database::new(database_url).await?),
    };

    info!(backend = store.backend_info(), "Connection store initialized");
    Ok(store)
}
