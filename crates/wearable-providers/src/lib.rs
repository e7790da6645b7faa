// ABOUTME: Wearable provider OAuth clients for Fitbit and Oura
// ABOUTME: Shared capability trait, token endpoint plumbing, and the provider registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Wearable provider implementations and core abstractions.
//!
//! Each provider implements [`LinkingProvider`]: exchange an authorization code for a
//! [`TokenSet`](wearable_core::models::TokenSet), refresh it, and read a minimal
//! profile. Request and response shapes stay private to each provider module.

// Re-export wearable-core modules so provider files can keep `use crate::errors::*` etc.
pub use wearable_core::constants;
pub use wearable_core::errors;
pub use wearable_core::models;

/// Core provider trait and configuration
pub mod core;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// Token endpoint and authenticated GET helpers shared by providers
pub mod oauth;
/// Registry of configured providers keyed by provider kind
pub mod registry;

/// Fitbit Web API provider implementation
#[cfg(feature = "provider-fitbit")]
pub mod fitbit_provider;
/// Oura Cloud API provider implementation
#[cfg(feature = "provider-oura")]
pub mod oura_provider;

pub use core::{LinkingProvider, ProviderConfig};
#[cfg(feature = "provider-fitbit")]
pub use fitbit_provider::FitbitProvider;
pub use http_client::{initialize_shared_client, shared_client};
#[cfg(feature = "provider-oura")]
pub use oura_provider::OuraProvider;
pub use registry::ProviderRegistry;
pub use wearable_core::errors::{ProviderError, ProviderResult};
