// ABOUTME: Configuration management module for the wearable link server
// ABOUTME: Exposes the environment-derived ServerConfig and its component sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! Configuration is read from the environment once, in the binary, and then
//! passed into the server as an immutable [`ServerConfig`]. Handlers never read
//! environment variables themselves.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    BackendConfig, CorsConfig, HttpClientConfig, ServerConfig, StoreBackend,
};
