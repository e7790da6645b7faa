// ABOUTME: OAuth authorization grant input and token set output types
// ABOUTME: Secrets are redacted from Debug output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::oauth_providers::MAX_TOKEN_LIFETIME_SECS;
use crate::errors::{ProviderError, ProviderResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Callback body: `{ "code": string, "state"?: string }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationGrant {
    /// Single-use authorization code from the provider redirect
    pub code: String,
    /// Opaque state echoed back by the provider; passed through, never validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl AuthorizationGrant {
    /// Grant with no state
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            state: None,
        }
    }
}

/// Tokens issued by a provider token endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token for provider API calls
    pub access_token: String,
    /// Token for the refresh grant
    pub refresh_token: String,
    /// Lifetime of `access_token` in seconds
    pub expires_in: i64,
    /// Granted scope, space separated
    pub scope: Option<String>,
    /// Provider account id when the token response carries one
    pub provider_user_id: Option<String>,
}

impl TokenSet {
    /// Reject lifetimes outside `1..=MAX_TOKEN_LIFETIME_SECS`
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` naming `provider` when `expires_in` is not positive
    /// or exceeds one year
    pub fn check_lifetime(&self, provider: &str) -> ProviderResult<()> {
        if (1..=MAX_TOKEN_LIFETIME_SECS).contains(&self.expires_in) {
            return Ok(());
        }
        Err(ProviderError::invalid_response(
            provider,
            format!(
                "expires_in {} outside 1..={MAX_TOKEN_LIFETIME_SECS}",
                self.expires_in
            ),
        ))
    }

    /// Absolute instant at which the access token stops being valid
    ///
    /// The lifetime is clamped to `0..=MAX_TOKEN_LIFETIME_SECS`, so this never
    /// overflows; run `check_lifetime` first to reject such responses instead.
    #[must_use]
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        let lifetime = self.expires_in.clamp(0, MAX_TOKEN_LIFETIME_SECS);
        Duration::try_seconds(lifetime)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(issued_at)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("provider_user_id", &self.provider_user_id)
            .finish()
    }
}
