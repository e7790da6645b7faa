// ABOUTME: Application-wide constants for provider identifiers and client-facing messages
// ABOUTME: Keeps sentinel device values and fixed error bodies in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module

/// Provider identifiers, OAuth endpoints, and device sentinels
pub mod oauth_providers {
    /// Fitbit provider identifier
    pub const FITBIT: &str = "fitbit";
    /// Oura provider identifier
    pub const OURA: &str = "oura";

    /// Fitbit OAuth token endpoint
    pub const FITBIT_TOKEN_URL: &str = "https://api.fitbit.com/oauth2/token";
    /// Fitbit Web API base URL (profile lives under `/1/user/-/profile.json`)
    pub const FITBIT_API_BASE: &str = "https://api.fitbit.com";

    /// Oura OAuth token endpoint
    pub const OURA_TOKEN_URL: &str = "https://api.ouraring.com/oauth/token";
    /// Oura API base URL (profile lives under `/v2/usercollection/personal_info`)
    pub const OURA_API_BASE: &str = "https://api.ouraring.com";

    /// Device id stored when Fitbit does not report an account id
    pub const FITBIT_DEFAULT_DEVICE_ID: &str = "fitbit_primary";
    /// Device name stored when Fitbit does not report a display name
    pub const FITBIT_DEFAULT_DEVICE_NAME: &str = "Fitbit Device";

    /// Device id stored when Oura does not report an account id
    pub const OURA_DEFAULT_DEVICE_ID: &str = "oura_ring";
    /// Device name stored for Oura connections
    pub const OURA_DEFAULT_DEVICE_NAME: &str = "Oura Ring";

    /// Longest access-token lifetime accepted from a token endpoint (one year)
    pub const MAX_TOKEN_LIFETIME_SECS: i64 = 365 * 24 * 60 * 60;
}

/// Fixed error bodies returned to callers
///
/// Internal detail is logged, never echoed to the client.
pub mod error_messages {
    /// 401 plain-text body
    pub const UNAUTHORIZED: &str = "Unauthorized";
    /// 400 body when the authorization-code exchange fails
    pub const TOKEN_EXCHANGE_FAILED: &str = "Failed to get access token";
    /// 400 body when a refresh-token grant fails
    pub const TOKEN_REFRESH_FAILED: &str = "Failed to refresh access token";
    /// 404 body when refreshing a connection that was never linked
    pub const CONNECTION_NOT_FOUND: &str = "Connection not found";
    /// 500 body for persistence failures
    pub const PERSISTENCE_FAILED: &str = "Failed to save connection";
    /// 500 body for everything else
    pub const INTERNAL_ERROR: &str = "Internal server error";
    /// 405 body for unsupported methods on callback routes
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
}

/// Service identity used in logs
pub mod service_names {
    /// Server binary / tracing service name
    pub const WEARABLE_LINK_SERVER: &str = "wearable-link-server";
}

/// Default values for configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default `SQLite` location when the local store is selected
    pub const DATABASE_URL: &str = "sqlite:./data/connections.db";
    /// Default CORS origin
    pub const CORS_ALLOWED_ORIGIN: &str = "*";
    /// Default outbound request timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
    /// Default outbound connect timeout
    pub const HTTP_CLIENT_CONNECT_TIMEOUT_SECS: u64 = 10;
}
