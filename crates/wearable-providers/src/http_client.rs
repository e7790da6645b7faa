// ABOUTME: Shared HTTP client with connection pooling for provider and backend calls
// ABOUTME: Singleton pattern with configurable timeouts initialized at server startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults::{HTTP_CLIENT_CONNECT_TIMEOUT_SECS, HTTP_CLIENT_TIMEOUT_SECS};
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::warn;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration
///
/// Must be called once at server startup before any provider creates HTTP clients.
/// If not called, defaults are used (30s timeout, 10s connect timeout). Later calls
/// keep the first values and log a warning.
pub fn initialize_shared_client(timeout_secs: u64, connect_timeout_secs: u64) {
    if let Err((ignored_timeout, ignored_connect)) =
        CLIENT_TIMEOUTS.set((timeout_secs, connect_timeout_secs))
    {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS.get().copied().unwrap_or_default();
        warn!(
            ignored_timeout,
            ignored_connect,
            timeout,
            connect_timeout,
            "Shared HTTP client timeouts already set; keeping the first values"
        );
    }
}

/// Timeouts the shared client uses or will use, as `(request, connect)` seconds
#[must_use]
pub fn shared_client_timeouts() -> (u64, u64) {
    CLIENT_TIMEOUTS
        .get()
        .copied()
        .unwrap_or((HTTP_CLIENT_TIMEOUT_SECS, HTTP_CLIENT_CONNECT_TIMEOUT_SECS))
}

/// Get the shared HTTP client for outbound calls
///
/// Falls back to default timeouts if `initialize_shared_client()` was not called.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = shared_client_timeouts();

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}
