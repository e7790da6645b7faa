// ABOUTME: Route module organization for the wearable link server
// ABOUTME: Provider callback/refresh endpoints and health checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Provider OAuth callback and token refresh routes
pub mod callbacks;
/// Health check and readiness routes
pub mod health;

pub use callbacks::CallbackRoutes;
pub use health::HealthRoutes;
