// ABOUTME: Application constants re-exported from wearable-core
// ABOUTME: Provider identifiers, device sentinels, fixed messages, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use wearable_core::constants::*;

/// Paths of the HTTP surface
pub mod routes {
    /// Prefix shared by the provider callback routes
    pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

    /// Identity service path that resolves the current user
    pub const IDENTITY_USER_PATH: &str = "/auth/v1/user";

    /// Backend REST path for the connections table
    pub const CONNECTIONS_REST_PATH: &str = "/rest/v1/external_connections";
}

/// Header names used when talking to the backend
pub mod headers {
    /// Backend project API key header
    pub const API_KEY: &str = "apikey";
    /// Request id header propagated through the server
    pub const REQUEST_ID: &str = "x-request-id";
}
