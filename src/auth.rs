// ABOUTME: Bearer session authentication against the backend identity service
// ABOUTME: Resolves the caller's session token into the owning account id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Session tokens are issued and validated by the backend identity service, so
//! this module does no token verification of its own. A bearer token is forwarded
//! to `GET {backend_url}/auth/v1/user`; the account id in the response is the only
//! thing the linking flow trusts.

use crate::config::BackendConfig;
use crate::constants::{headers, routes};
use crate::errors::{AppError, AppResult};
use crate::models::AuthenticatedUser;
use async_trait::async_trait;
use http::{header::AUTHORIZATION, HeaderMap};
use reqwest::Client;
use tracing::{debug, instrument};

/// Resolves bearer session tokens into users
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve the account that owns `token`
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the token does not resolve to a user
    async fn resolve_user(&self, token: &str) -> AppResult<AuthenticatedUser>;
}

/// Identity service client for the backend project
pub struct BackendIdentityService {
    user_url: String,
    anon_key: String,
    client: Client,
}

impl BackendIdentityService {
    /// Create an identity client from backend configuration
    #[must_use]
    pub fn new(backend: &BackendConfig, client: Client) -> Self {
        Self {
            user_url: format!("{}{}", backend.url, routes::IDENTITY_USER_PATH),
            anon_key: backend.anon_key.clone(),
            client,
        }
    }
}

#[async_trait]
impl IdentityService for BackendIdentityService {
    #[instrument(skip_all)]
    async fn resolve_user(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let response = self
            .client
            .get(&self.user_url)
            .header(headers::API_KEY, &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::auth_invalid(format!("Identity service unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::auth_invalid(format!(
                "Identity service rejected session token with status {status}"
            )));
        }

        let user: AuthenticatedUser = response
            .json()
            .await
            .map_err(|e| AppError::auth_invalid(format!("Unreadable identity response: {e}")))?;

        if user.id.trim().is_empty() {
            return Err(AppError::auth_invalid("Identity response carried no user id"));
        }

        debug!(user_id = %user.id, "Session token resolved");
        Ok(user)
    }
}

/// Extract the bearer token from an `Authorization` header
///
/// # Errors
///
/// Returns `auth_required` when the header is missing, not UTF-8, not a bearer
/// credential, or empty
pub fn extract_bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .ok_or_else(AppError::auth_required)?;

    if token.is_empty() {
        return Err(AppError::auth_required());
    }
    Ok(token)
}

/// Authenticate a request: bearer extraction followed by identity resolution
///
/// # Errors
///
/// Returns an authentication error on any failure
pub async fn authenticate(
    identity: &dyn IdentityService,
    headers: &HeaderMap,
) -> AppResult<AuthenticatedUser> {
    let token = extract_bearer_token(headers)?;
    identity.resolve_user(token).await
}
