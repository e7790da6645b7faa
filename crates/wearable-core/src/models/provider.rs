// ABOUTME: Enumerated provider tag for wearable integrations
// ABOUTME: Serialized lowercase; drives routes, sentinels, and settings keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::oauth_providers;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wearable provider a connection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Fitbit Web API
    Fitbit,
    /// Oura Cloud API
    Oura,
}

impl ProviderKind {
    /// Every supported provider, in registration order
    pub const ALL: [Self; 2] = [Self::Fitbit, Self::Oura];

    /// Lowercase identifier used in storage and routes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fitbit => oauth_providers::FITBIT,
            Self::Oura => oauth_providers::OURA,
        }
    }

    /// Human-readable name for logs
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Fitbit => "Fitbit",
            Self::Oura => "Oura",
        }
    }

    /// Key under which the provider account id is kept in `settings`
    #[must_use]
    pub const fn account_settings_key(self) -> &'static str {
        match self {
            Self::Fitbit => "fitbit_user_id",
            Self::Oura => "oura_user_id",
        }
    }

    /// Device id stored when the profile lookup yields nothing
    #[must_use]
    pub const fn default_device_id(self) -> &'static str {
        match self {
            Self::Fitbit => oauth_providers::FITBIT_DEFAULT_DEVICE_ID,
            Self::Oura => oauth_providers::OURA_DEFAULT_DEVICE_ID,
        }
    }

    /// Device name stored when the profile lookup yields nothing
    #[must_use]
    pub const fn default_device_name(self) -> &'static str {
        match self {
            Self::Fitbit => oauth_providers::FITBIT_DEFAULT_DEVICE_NAME,
            Self::Oura => oauth_providers::OURA_DEFAULT_DEVICE_NAME,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            oauth_providers::FITBIT => Ok(Self::Fitbit),
            oauth_providers::OURA => Ok(Self::Oura),
            other => Err(AppError::not_found(format!("Provider '{other}'"))),
        }
    }
}
