// ABOUTME: Main library entry point for the wearable link server
// ABOUTME: OAuth callback handling that links Fitbit and Oura accounts to backend users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Wearable Link Server
//!
//! An HTTP service that finishes the OAuth 2.0 authorization-code flow for wearable
//! providers and stores the resulting credentials against the caller's account.
//!
//! ## Request flow
//!
//! Every callback request runs the same four sequential steps:
//!
//! 1. **Authenticate** the caller's bearer session token with the backend identity service
//! 2. **Exchange** the authorization code at the provider token endpoint
//! 3. **Fetch** a minimal provider profile (failure here only degrades device metadata)
//! 4. **Persist** one connection per `(user_id, provider)` with an upsert
//!
//! ## Architecture
//!
//! - **Providers** (`wearable-providers`): one `LinkingProvider` per wearable API
//! - **Auth**: bearer token resolution against the backend identity service
//! - **Database**: `ConnectionStore` backed by the backend REST API or `SQLite`
//! - **Services**: the linking flow itself, independent of HTTP
//! - **Routes**: thin axum handlers with a fixed CORS header set
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wearable_link::config::environment::ServerConfig;
//! use wearable_link::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Bearer session authentication against the backend identity service
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants (re-exported from `wearable-core`)
pub mod constants;

/// Connection storage backends
pub mod database;

/// Unified error handling (re-exported from `wearable-core`)
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for request tracing and CORS headers
pub mod middleware;

/// Domain models (re-exported from `wearable-core`)
pub mod models;

/// Wearable provider clients (re-exported from `wearable-providers`)
pub mod providers;

/// Shared server resources handed to every route
pub mod resources;

/// HTTP route definitions
pub mod routes;

/// HTTP server assembly and lifecycle
pub mod server;

/// Business logic independent of HTTP
pub mod services;
