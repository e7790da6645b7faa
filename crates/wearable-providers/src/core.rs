// ABOUTME: Core provider trait and configuration shared by all wearable providers
// ABOUTME: Defines the exchange/refresh/profile capability each provider implements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider capability
//!
//! The linking flow only needs three things from a provider:
//!
//! 1. `exchange_code` - authorization-code grant, returning a [`TokenSet`]
//! 2. `fetch_profile` - a minimal "who am I" read with the new access token
//! 3. `refresh_tokens` - refresh-token grant for an existing connection
//!
//! Provider-specific request and response shapes stay inside each implementation;
//! the rest of the server only sees the shared models from `wearable-core`.

use crate::constants::oauth_providers;
use crate::errors::ProviderResult;
use crate::models::{AuthorizationGrant, ProfileInfo, ProviderKind, TokenSet};
use async_trait::async_trait;
use std::fmt;

/// Client credentials and endpoints for one provider
///
/// Held as process-wide configuration. `Debug` never prints the client secret.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Provider this configuration belongs to
    pub kind: ProviderKind,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// OAuth token endpoint URL
    pub token_url: String,
    /// Base URL for provider API calls
    pub api_base_url: String,
    /// Redirect URI registered with the provider, sent on the code exchange when set
    pub redirect_uri: Option<String>,
}

impl ProviderConfig {
    /// Fitbit configuration with production endpoints
    #[must_use]
    pub fn fitbit(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Fitbit,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: oauth_providers::FITBIT_TOKEN_URL.to_owned(),
            api_base_url: oauth_providers::FITBIT_API_BASE.to_owned(),
            redirect_uri: None,
        }
    }

    /// Oura configuration with production endpoints
    #[must_use]
    pub fn oura(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Oura,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: oauth_providers::OURA_TOKEN_URL.to_owned(),
            api_base_url: oauth_providers::OURA_API_BASE.to_owned(),
            redirect_uri: None,
        }
    }

    /// Set the redirect URI
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: Option<String>) -> Self {
        self.redirect_uri = redirect_uri;
        self
    }

    /// Point both endpoints at another host (local fakes, staging)
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let token_path = match self.kind {
            ProviderKind::Fitbit => "/oauth2/token",
            ProviderKind::Oura => "/oauth/token",
        };
        self.token_url = format!("{base}{token_path}");
        self.api_base_url = base.to_owned();
        self
    }

    /// Join a path onto the API base URL
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Capability every wearable provider exposes to the linking flow
#[async_trait]
pub trait LinkingProvider: Send + Sync {
    /// Provider tag
    fn kind(&self) -> ProviderKind;

    /// Provider configuration
    fn config(&self) -> &ProviderConfig;

    /// Exchange a single-use authorization code for tokens
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::TokenEndpoint` when the provider rejects the code,
    /// or a transport / invalid-response error otherwise
    async fn exchange_code(&self, grant: &AuthorizationGrant) -> ProviderResult<TokenSet>;

    /// Exchange a refresh token for a new token set
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::TokenEndpoint` when the provider rejects the token,
    /// or a transport / invalid-response error otherwise
    async fn refresh_tokens(&self, refresh_token: &str) -> ProviderResult<TokenSet>;

    /// Read the minimal identifying profile for an access token
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success response
    async fn fetch_profile(&self, access_token: &str) -> ProviderResult<ProfileInfo>;
}
