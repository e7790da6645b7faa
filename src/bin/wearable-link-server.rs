// ABOUTME: Server binary linking Fitbit and Oura accounts to backend users
// ABOUTME: Loads configuration from the environment, wires resources, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Wearable Link Server Binary
//!
//! Reads `ServerConfig` from the environment, builds the provider registry,
//! identity client, and connection store, then serves the callback routes.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use wearable_link::{
    auth::BackendIdentityService,
    config::environment::ServerConfig,
    database::create_store,
    logging,
    providers::{initialize_shared_client, shared_client, ProviderRegistry},
    resources::ServerResources,
    server::LinkServer,
};

#[derive(Parser)]
#[command(name = "wearable-link-server")]
#[command(about = "Wearable Link - OAuth account linking for Fitbit and Oura")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize production logging
    logging::init_from_env()?;

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    // Timeouts must be set before the first provider grabs the shared client
    initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );
    let client = shared_client().clone();

    let providers = ProviderRegistry::from_configs(config.providers.clone());
    let identity = Arc::new(BackendIdentityService::new(&config.backend, client.clone()));
    let store = create_store(&config, client).await?;

    let port = config.http_port;
    let server = LinkServer::new(ServerResources::new(config, providers, identity, store));

    if let Err(e) = server.run(port).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
