// ABOUTME: HTTP server assembly and lifecycle for the wearable link service
// ABOUTME: Builds the axum router with middleware and serves it until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::middleware::with_request_tracing;
use crate::resources::ServerResources;
use crate::routes::{CallbackRoutes, HealthRoutes};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Wearable link HTTP server
pub struct LinkServer {
    resources: Arc<ServerResources>,
}

impl LinkServer {
    /// Create a server over shared resources
    #[must_use]
    pub fn new(resources: ServerResources) -> Self {
        Self {
            resources: Arc::new(resources),
        }
    }

    /// Complete router: provider callbacks, health checks, and request tracing
    #[must_use]
    pub fn router(resources: Arc<ServerResources>) -> Router {
        let app = Router::new()
            .merge(CallbackRoutes::routes(resources))
            .merge(HealthRoutes::routes());

        with_request_tracing(app)
    }

    /// Bind to `0.0.0.0:{port}` and serve until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails
    pub async fn run(&self, port: u16) -> AppResult<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails
    pub async fn serve(&self, listener: TcpListener) -> AppResult<()> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;
        info!(
            "HTTP server listening on http://{} (store: {}, providers: {:?})",
            local_addr,
            self.resources.store.backend_info(),
            self.resources.providers.kinds(),
        );

        if self.resources.providers.is_empty() {
            warn!("No providers registered; only health routes are served");
        }

        let app = Self::router(Arc::clone(&self.resources));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Transport error: {e}")))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received; draining connections"),
        Err(e) => warn!("Failed to listen for shutdown signal: {e}"),
    }
}
