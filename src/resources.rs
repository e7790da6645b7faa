// ABOUTME: Centralized resource container for dependency injection into routes
// ABOUTME: Holds the immutable configuration, provider registry, identity client, and store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared by every request. Nothing in here is
//! mutated after construction, so concurrent requests cannot interfere.

use crate::auth::IdentityService;
use crate::config::ServerConfig;
use crate::database::ConnectionStore;
use crate::providers::ProviderRegistry;
use crate::services::ConnectionLinker;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Providers with configured credentials
    pub providers: Arc<ProviderRegistry>,
    /// Session token resolver
    pub identity: Arc<dyn IdentityService>,
    /// Connection persistence
    pub store: Arc<dyn ConnectionStore>,
    /// Linking flow bound to `store`
    pub linker: ConnectionLinker,
}

impl ServerResources {
    /// Assemble resources; the linker writes to the same store
    #[must_use]
    pub fn new(
        config: ServerConfig,
        providers: ProviderRegistry,
        identity: Arc<dyn IdentityService>,
        store: Arc<dyn ConnectionStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            providers: Arc::new(providers),
            identity,
            linker: ConnectionLinker::new(Arc::clone(&store)),
            store,
        }
    }
}
