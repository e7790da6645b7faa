// ABOUTME: Core types and constants for the wearable link server
// ABOUTME: Foundation crate with error handling, connection models, and provider constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Wearable Core
//!
//! Foundation crate shared by the provider clients and the HTTP server.
//! It changes infrequently, which keeps incremental builds of the workspace fast.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and `ProviderError`
//! - **models**: `ExternalConnection`, `TokenSet`, `ProfileInfo`, `ProviderKind`
//! - **constants**: provider identifiers, device sentinels, and client-facing messages

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Domain models for linked wearable accounts
pub mod models;
