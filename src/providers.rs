// ABOUTME: Wearable provider clients re-exported from wearable-providers
// ABOUTME: LinkingProvider trait, provider configuration, shared client, and the registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use wearable_providers::{
    initialize_shared_client, shared_client, LinkingProvider, ProviderConfig, ProviderError,
    ProviderRegistry, ProviderResult,
};

#[cfg(feature = "provider-fitbit")]
pub use wearable_providers::FitbitProvider;
#[cfg(feature = "provider-oura")]
pub use wearable_providers::OuraProvider;
