// ABOUTME: Oura Cloud API provider for the account-linking flow
// ABOUTME: Form-credential token exchange/refresh and personal_info profile lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::core::{LinkingProvider, ProviderConfig};
use crate::errors::ProviderResult;
use crate::http_client::shared_client;
use crate::models::{AuthorizationGrant, ProfileInfo, ProviderKind, TokenSet};
use crate::oauth::{get_json, request_tokens, ClientAuth};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Profile endpoint, relative to the API base URL
const PERSONAL_INFO_PATH: &str = "/v2/usercollection/personal_info";

/// Oura personal info response; only the id is read, `email` and the rest are dropped
#[derive(Debug, Deserialize)]
struct OuraPersonalInfo {
    id: Option<String>,
}

/// Oura provider
pub struct OuraProvider {
    config: ProviderConfig,
    client: Client,
}

impl OuraProvider {
    /// Create an Oura provider using the shared HTTP client
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(config, shared_client().clone())
    }

    /// Create an Oura provider with a specific HTTP client
    #[must_use]
    pub const fn with_client(config: ProviderConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl LinkingProvider for OuraProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Oura
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[instrument(skip_all, fields(provider = "oura"))]
    async fn exchange_code(&self, grant: &AuthorizationGrant) -> ProviderResult<TokenSet> {
        // Oura echoes `state` back on the redirect; it is not checked here.
        if let Some(state) = &grant.state {
            debug!(state_len = state.len(), "Oura callback carried state");
        }

        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("code", grant.code.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        if let Some(redirect_uri) = &self.config.redirect_uri {
            form.push(("redirect_uri", redirect_uri.as_str()));
        }

        request_tokens(&self.client, &self.config, ClientAuth::FormBody, &form, None).await
    }

    #[instrument(skip_all, fields(provider = "oura"))]
    async fn refresh_tokens(&self, refresh_token: &str) -> ProviderResult<TokenSet> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        request_tokens(
            &self.client,
            &self.config,
            ClientAuth::FormBody,
            &form,
            Some(refresh_token),
        )
        .await
    }

    #[instrument(skip_all, fields(provider = "oura"))]
    async fn fetch_profile(&self, access_token: &str) -> ProviderResult<ProfileInfo> {
        let url = self.config.api_url(PERSONAL_INFO_PATH);
        let info: OuraPersonalInfo = get_json(&self.client, &self.config, &url, access_token).await?;

        Ok(ProfileInfo {
            account_id: info.id,
            display_name: None,
        })
    }
}
