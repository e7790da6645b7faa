// ABOUTME: HTTP middleware for request tracing and fixed CORS response headers
// ABOUTME: Applied as tower layers on the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Fixed CORS header set for the callback routes
pub mod cors;
/// Request id propagation and per-request spans
pub mod tracing;

// CORS configuration
pub use cors::with_cors_headers;

// Request tracing
pub use self::tracing::with_request_tracing;
