// ABOUTME: Structured error types for wearable provider OAuth and profile calls
// ABOUTME: Keeps the upstream status and raw body for server-side logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised while talking to a provider's OAuth or profile endpoints
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The token endpoint answered with a non-success status
    #[error("{provider} token endpoint returned {status_code}: {body}")]
    TokenEndpoint {
        /// Provider identifier
        provider: String,
        /// Upstream HTTP status
        status_code: u16,
        /// Raw upstream body, for logs only
        body: String,
    },

    /// A non-token API call answered with a non-success status
    #[error("{provider} API returned {status_code}: {body}")]
    ApiError {
        /// Provider identifier
        provider: String,
        /// Upstream HTTP status
        status_code: u16,
        /// Raw upstream body, for logs only
        body: String,
    },

    /// The request never produced a response
    #[error("{provider} request failed: {message}")]
    Transport {
        /// Provider identifier
        provider: String,
        /// Transport error description
        message: String,
    },

    /// The response body did not match the expected shape
    #[error("{provider} returned an unexpected response: {message}")]
    InvalidResponse {
        /// Provider identifier
        provider: String,
        /// Parse error description
        message: String,
    },
}

impl ProviderError {
    /// Provider this error came from
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::TokenEndpoint { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::Transport { provider, .. }
            | Self::InvalidResponse { provider, .. } => provider,
        }
    }

    /// Whether the provider explicitly rejected the request
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::TokenEndpoint { .. } | Self::ApiError { .. })
    }

    /// Build a transport error from any displayable cause
    #[must_use]
    pub fn transport(provider: &str, cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            provider: provider.to_owned(),
            message: cause.to_string(),
        }
    }

    /// Build an invalid-response error from any displayable cause
    #[must_use]
    pub fn invalid_response(provider: &str, cause: impl std::fmt::Display) -> Self {
        Self::InvalidResponse {
            provider: provider.to_owned(),
            message: cause.to_string(),
        }
    }
}

/// Result alias for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Token endpoint rejections become 400s; anything else stays internal
impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match error {
            ProviderError::TokenEndpoint { .. } => ErrorCode::TokenExchangeFailed,
            ProviderError::ApiError { .. }
            | ProviderError::Transport { .. }
            | ProviderError::InvalidResponse { .. } => ErrorCode::ExternalServiceError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
