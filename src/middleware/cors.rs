// ABOUTME: CORS response headers for browser clients of the callback endpoints
// ABOUTME: Writes one fixed header set on every response, success or error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::CorsConfig;
use crate::constants::defaults;
use axum::Router;
use http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    },
    HeaderValue,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

/// Request headers browsers may send to the callback endpoints
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Methods the callback endpoints answer
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Configured origin as a header value, falling back to `*` when unparseable
#[must_use]
pub fn allowed_origin(config: &CorsConfig) -> HeaderValue {
    HeaderValue::from_str(config.allowed_origin.trim()).unwrap_or_else(|_| {
        warn!(
            origin = %config.allowed_origin,
            "Invalid CORS_ALLOWED_ORIGIN; falling back to wildcard"
        );
        HeaderValue::from_static(defaults::CORS_ALLOWED_ORIGIN)
    })
}

/// Attach the fixed CORS header set to every response from `router`
///
/// Unlike `tower_http::cors::CorsLayer` this does not inspect the request: the
/// same three headers are written on preflights, successes, and errors alike.
pub fn with_cors_headers<S>(router: Router<S>, config: &CorsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            allowed_origin(config),
        ))
}
