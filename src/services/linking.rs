// ABOUTME: Account-linking flow: exchange the code, resolve the profile, persist the connection
// ABOUTME: Also refreshes stored connections with the provider refresh-token grant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Linking flow
//!
//! The steps run strictly in order and none of them is retried:
//!
//! 1. exchange the authorization code (a provider rejection aborts with 400)
//! 2. fetch the provider profile (any failure falls back to the device sentinels)
//! 3. upsert the connection for `(user_id, provider)`

use crate::database::ConnectionStore;
use crate::errors::{AppError, AppResult, ProviderError};
use crate::models::{AuthenticatedUser, AuthorizationGrant, ExternalConnection, ProfileInfo};
use crate::providers::LinkingProvider;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Runs the linking and refresh flows against a connection store
#[derive(Clone)]
pub struct ConnectionLinker {
    store: Arc<dyn ConnectionStore>,
}

impl ConnectionLinker {
    /// Create a linker writing to `store`
    #[must_use]
    pub fn new(store: Arc<dyn ConnectionStore>) -> Self {
        Self { store }
    }

    /// Link a provider account to `user`
    ///
    /// # Errors
    ///
    /// - `TOKEN_EXCHANGE_FAILED` when the provider rejects the code
    /// - `EXTERNAL_SERVICE_ERROR` when the token endpoint is unreachable, answers
    ///   nonsense, or reports a lifetime outside one second to one year
    /// - `DATABASE_ERROR` when the upsert fails
    #[instrument(skip_all, fields(provider = %provider.kind(), user_id = %user.id))]
    pub async fn link_account(
        &self,
        provider: &dyn LinkingProvider,
        user: &AuthenticatedUser,
        grant: &AuthorizationGrant,
    ) -> AppResult<ExternalConnection> {
        let kind = provider.kind();
        let tokens = provider.exchange_code(grant).await?;
        tokens.check_lifetime(kind.as_str())?;
        let issued_at = Utc::now();

        let profile = Self::resolve_profile(provider, &tokens.access_token).await;
        let connection =
            ExternalConnection::link(&user.id, kind, &tokens, profile.as_ref(), issued_at);

        self.store.upsert_connection(&connection).await?;

        info!(
            device_id = %connection.device_id,
            token_expires_at = %connection.token_expires_at,
            "Provider account linked"
        );
        Ok(connection)
    }

    /// Refresh the stored connection for `user` and persist the new tokens
    ///
    /// # Errors
    ///
    /// - `RESOURCE_NOT_FOUND` when the user never linked this provider
    /// - `TOKEN_REFRESH_FAILED` when the provider rejects the refresh token
    /// - `EXTERNAL_SERVICE_ERROR` when the refreshed lifetime is out of range
    /// - `DATABASE_ERROR` when loading or saving the connection fails
    #[instrument(skip_all, fields(provider = %provider.kind(), user_id = %user.id))]
    pub async fn refresh_connection(
        &self,
        provider: &dyn LinkingProvider,
        user: &AuthenticatedUser,
    ) -> AppResult<ExternalConnection> {
        let kind = provider.kind();
        let existing = self
            .store
            .get_connection(&user.id, kind)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} connection", kind.display_name())))?;

        let tokens = provider
            .refresh_tokens(&existing.refresh_token)
            .await
            .map_err(|e| match e {
                ProviderError::TokenEndpoint { .. } => {
                    AppError::token_refresh(e.to_string()).with_source(e)
                }
                other => AppError::from(other),
            })?;
        tokens.check_lifetime(kind.as_str())?;

        let now = Utc::now();
        if existing.is_expired(now) {
            info!(expired_at = %existing.token_expires_at, "Replacing expired access token");
        }
        let refreshed = existing.refreshed(&tokens, now);
        self.store.upsert_connection(&refreshed).await?;

        info!(token_expires_at = %refreshed.token_expires_at, "Provider tokens refreshed");
        Ok(refreshed)
    }

    /// Profile lookup that never fails the flow
    async fn resolve_profile(
        provider: &dyn LinkingProvider,
        access_token: &str,
    ) -> Option<ProfileInfo> {
        match provider.fetch_profile(access_token).await {
            Ok(profile) => {
                if profile.account_id.is_none() {
                    warn!("Provider profile has no account id; using device sentinel");
                }
                Some(profile)
            }
            Err(e) => {
                warn!(
                    upstream = e.provider(),
                    rejected = e.is_rejection(),
                    error = %e,
                    "Provider profile lookup failed; using device sentinel"
                );
                None
            }
        }
    }
}
