// ABOUTME: Provider registry mapping provider kinds to configured implementations
// ABOUTME: Built once at startup from injected configuration; read-only afterwards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::core::{LinkingProvider, ProviderConfig};
use crate::models::ProviderKind;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Registry of the providers this server can link
///
/// Only providers with configured client credentials are registered, so a missing
/// entry means the callback route for that provider is not mounted.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn LinkingProvider>>,
}

impl ProviderRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with the compiled-in implementation for each configuration
    #[must_use]
    pub fn from_configs(configs: impl IntoIterator<Item = ProviderConfig>) -> Self {
        let mut registry = Self::new();
        for config in configs {
            match Self::create_provider(config) {
                Some(provider) => registry.register(provider),
                None => warn!("Provider configured but not compiled in; skipping"),
            }
        }
        registry
    }

    fn create_provider(config: ProviderConfig) -> Option<Arc<dyn LinkingProvider>> {
        match config.kind {
            #[cfg(feature = "provider-fitbit")]
            ProviderKind::Fitbit => Some(Arc::new(crate::fitbit_provider::FitbitProvider::new(
                config,
            ))),
            #[cfg(feature = "provider-oura")]
            ProviderKind::Oura => Some(Arc::new(crate::oura_provider::OuraProvider::new(config))),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Register (or replace) the implementation for its provider kind
    pub fn register(&mut self, provider: Arc<dyn LinkingProvider>) {
        let kind = provider.kind();
        info!(provider = %kind, "Registered linking provider");
        self.providers.insert(kind, provider);
    }

    /// Look up a provider
    #[must_use]
    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn LinkingProvider>> {
        self.providers.get(&kind).cloned()
    }

    /// Registered provider kinds, in stable order
    #[must_use]
    pub fn kinds(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.providers.contains_key(kind))
            .collect()
    }

    /// Whether no provider is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
