// ABOUTME: Fitbit Web API provider for the account-linking flow
// ABOUTME: Basic-auth token exchange/refresh and encodedId profile lookup
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
const PROFILE_PATH: &str = "/1/user/-/profile.json";

/// Fitbit user profile API response wrapper
#[derive(Debug, Deserialize)]
struct FitbitUserResponse {
    user: Option<FitbitUserProfile>,
}

/// Fitbit user profile data; every field may be withheld by scope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitUserProfile {
    encoded_id: Option<String>,
    display_name: Option<String>,
}

/// Fitbit provider
pub struct FitbitProvider {
    config: ProviderConfig,
    client: Client,
}

impl FitbitProvider {
    /// Create a Fitbit provider using the shared HTTP client
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(config, shared_client().clone())
    }

    /// Create a Fitbit provider with a specific HTTP client
    #[must_use]
    pub const fn with_client(config: ProviderConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl LinkingProvider for FitbitProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Fitbit
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[instrument(skip_all, fields(provider = "fitbit"))]
    async fn exchange_code(&self, grant: &AuthorizationGrant) -> ProviderResult<TokenSet> {
        let mut form = vec![
            ("client_id", self.config.client_id.as_str()),
            ("grant_type", "authorization_code"),
            ("code", grant.code.as_str()),
        ];
        if let Some(redirect_uri) = &self.config.redirect_uri {
            form.push(("redirect_uri", redirect_uri.as_str()));
        }

        request_tokens(
            &self.client,
            &self.config,
            ClientAuth::BasicHeader,
            &form,
            None,
        )
        .await
    }

    #[instrument(skip_all, fields(provider = "fitbit"))]
    async fn refresh_tokens(&self, refresh_token: &str) -> ProviderResult<TokenSet> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        request_tokens(
            &self.client,
            &self.config,
            ClientAuth::BasicHeader,
            &form,
            Some(refresh_token),
        )
        .await
    }

    #[instrument(skip_all, fields(provider = "fitbit"))]
    async fn fetch_profile(&self, access_token: &str) -> ProviderResult<ProfileInfo> {
        let url = self.config.api_url(PROFILE_PATH);
        let response: FitbitUserResponse =
            get_json(&self.client, &self.config, &url, access_token).await?;

        let profile = response.user.map_or_else(ProfileInfo::default, |user| ProfileInfo {
            account_id: user.encoded_id,
            display_name: user.display_name,
        });
        debug!(has_account_id = profile.account_id.is_some(), "Fitbit profile resolved");

        Ok(profile)
    }
}
