// ABOUTME: Persisted external connection record and the profile/device metadata feeding it
// ABOUTME: One record per (user_id, provider); re-linking rebuilds every field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ProviderKind, TokenSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// User resolved from a bearer session token by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Opaque account identifier
    pub id: String,
    /// Account email, when the identity service exposes it
    #[serde(default)]
    pub email: Option<String>,
}

/// Minimal identifying profile returned by a provider "who am I" endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInfo {
    /// Provider account or device identifier
    pub account_id: Option<String>,
    /// Display string for the account
    pub display_name: Option<String>,
}

/// Device metadata stored on a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Provider identifier or the per-provider sentinel
    pub device_id: String,
    /// Provider display string or the per-provider sentinel
    pub device_name: String,
}

impl DeviceInfo {
    /// Sentinel device for a provider
    #[must_use]
    pub fn fallback(provider: ProviderKind) -> Self {
        Self {
            device_id: provider.default_device_id().to_owned(),
            device_name: provider.default_device_name().to_owned(),
        }
    }

    /// Fill missing or blank profile fields with the provider sentinels
    #[must_use]
    pub fn resolve(provider: ProviderKind, profile: Option<&ProfileInfo>) -> Self {
        let non_blank = |value: Option<&String>| value.filter(|v| !v.trim().is_empty()).cloned();

        let fallback = Self::fallback(provider);
        let Some(profile) = profile else {
            return fallback;
        };

        Self {
            device_id: non_blank(profile.account_id.as_ref()).unwrap_or(fallback.device_id),
            device_name: non_blank(profile.display_name.as_ref()).unwrap_or(fallback.device_name),
        }
    }
}

/// One linked provider account; unique per `(user_id, provider)`
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalConnection {
    /// Owning account
    pub user_id: String,
    /// Provider tag
    pub provider: ProviderKind,
    /// Provider bearer credential
    pub access_token: String,
    /// Provider refresh credential
    pub refresh_token: String,
    /// The access token is invalid at and after this instant
    pub token_expires_at: DateTime<Utc>,
    /// Provider device/account id or sentinel
    pub device_id: String,
    /// Provider display string or sentinel
    pub device_name: String,
    /// Provider-specific bag: granted scope and provider account id
    pub settings: Value,
    /// Last time this row was written
    pub updated_at: DateTime<Utc>,
}

impl ExternalConnection {
    /// Assemble the record written after a successful authorization-code exchange
    #[must_use]
    pub fn link(
        user_id: impl Into<String>,
        provider: ProviderKind,
        tokens: &TokenSet,
        profile: Option<&ProfileInfo>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let device = DeviceInfo::resolve(provider, profile);
        let account_id = tokens
            .provider_user_id
            .clone()
            .or_else(|| profile.and_then(|p| p.account_id.clone()));

        let mut settings = json!({ "scope": tokens.scope });
        settings[provider.account_settings_key()] = json!(account_id);

        Self {
            user_id: user_id.into(),
            provider,
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            token_expires_at: tokens.expires_at(issued_at),
            device_id: device.device_id,
            device_name: device.device_name,
            settings,
            updated_at: issued_at,
        }
    }

    /// Copy of this record carrying tokens from a refresh grant
    ///
    /// Device metadata and the provider account id are kept; the scope is
    /// replaced only when the provider reports one.
    #[must_use]
    pub fn refreshed(&self, tokens: &TokenSet, issued_at: DateTime<Utc>) -> Self {
        let mut settings = if self.settings.is_object() {
            self.settings.clone()
        } else {
            json!({})
        };
        if let Some(scope) = &tokens.scope {
            settings["scope"] = json!(scope);
        }

        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            token_expires_at: tokens.expires_at(issued_at),
            settings,
            updated_at: issued_at,
            ..self.clone()
        }
    }

    /// Whether the access token is no longer valid at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.token_expires_at
    }
}

impl fmt::Debug for ExternalConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalConnection")
            .field("user_id", &self.user_id)
            .field("provider", &self.provider)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_expires_at", &self.token_expires_at)
            .field("device_id", &self.device_id)
            .field("device_name", &self.device_name)
            .field("settings", &self.settings)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
