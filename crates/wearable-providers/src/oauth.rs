// ABOUTME: Token endpoint and authenticated GET plumbing shared by provider implementations
// ABOUTME: Logs raw upstream error bodies server-side and maps them to ProviderError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::core::ProviderConfig;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::TokenSet;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

/// Lifetime assumed when a token response omits `expires_in`
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// How the client authenticates to the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuth {
    /// `Authorization: Basic base64(client_id:client_secret)`
    BasicHeader,
    /// `client_id` and `client_secret` in the form body
    FormBody,
}

/// Raw token endpoint response, superset of the provider shapes
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
    /// Fitbit includes the account id in the token response
    user_id: Option<String>,
}

/// POST a form to the token endpoint and parse the token set
///
/// `previous_refresh_token` is reused when a refresh response does not rotate the
/// refresh token. The raw body of a rejected request is logged and kept in the
/// error, never returned to callers of the HTTP API.
///
/// # Errors
///
/// - `TokenEndpoint` on a non-success status
/// - `Transport` if the request could not be sent
/// - `InvalidResponse` if the body is not a token response or `expires_in` is
///   not a positive lifetime of at most one year
pub async fn request_tokens(
    client: &Client,
    config: &ProviderConfig,
    auth: ClientAuth,
    form: &[(&str, &str)],
    previous_refresh_token: Option<&str>,
) -> ProviderResult<TokenSet> {
    let provider = config.kind.as_str();
    debug!(provider, token_url = %config.token_url, "Requesting provider tokens");

    let mut request = client.post(&config.token_url).form(form);
    if auth == ClientAuth::BasicHeader {
        let credentials =
            BASE64_STANDARD.encode(format!("{}:{}", config.client_id, config.client_secret));
        request = request.header("Authorization", format!("Basic {credentials}"));
    }

    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::transport(provider, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::transport(provider, e))?;

    if !status.is_success() {
        error!(
            provider,
            status = status.as_u16(),
            body = %body,
            "Provider token endpoint rejected the request"
        );
        return Err(ProviderError::TokenEndpoint {
            provider: provider.to_owned(),
            status_code: status.as_u16(),
            body,
        });
    }

    let parsed: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| ProviderError::invalid_response(provider, e))?;

    let refresh_token = parsed
        .refresh_token
        .or_else(|| previous_refresh_token.map(str::to_owned))
        .ok_or_else(|| ProviderError::invalid_response(provider, "missing refresh_token"))?;

    let tokens = TokenSet {
        access_token: parsed.access_token,
        refresh_token,
        expires_in: parsed.expires_in.unwrap_or(DEFAULT_TOKEN_EXPIRY_SECONDS),
        scope: parsed.scope,
        provider_user_id: parsed.user_id,
    };
    tokens.check_lifetime(provider)?;

    Ok(tokens)
}

/// GET a provider API URL with a bearer token and decode the JSON body
///
/// # Errors
///
/// - `ApiError` on a non-success status
/// - `Transport` if the request could not be sent
/// - `InvalidResponse` if the body does not decode into `T`
pub async fn get_json<T>(
    client: &Client,
    config: &ProviderConfig,
    url: &str,
    access_token: &str,
) -> ProviderResult<T>
where
    T: DeserializeOwned,
{
    let provider = config.kind.as_str();
    debug!(provider, url, "Making authenticated provider API request");

    let response = client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| ProviderError::transport(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::ApiError {
            provider: provider.to_owned(),
            status_code: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::invalid_response(provider, e))
}
