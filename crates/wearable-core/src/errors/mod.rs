// ABOUTME: Unified error handling with standard error codes and HTTP response mapping
// ABOUTME: Internal detail stays in the error for logging; clients only see fixed messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. An [`AppError`]
//! carries an [`ErrorCode`] that decides the HTTP status and the fixed message shown
//! to the caller, plus a free-form `message` holding the internal detail. The detail
//! is written to the log when the error is turned into a response and is never
//! serialized into the response body.

/// Provider-specific errors raised by the OAuth clients
pub mod provider;

pub use provider::{ProviderError, ProviderResult};

use crate::constants::error_messages;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// No session token was supplied
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// The session token did not resolve to a user
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,

    // Request shape (3000-3999)
    /// The route does not accept this HTTP method
    #[serde(rename = "METHOD_NOT_ALLOWED")]
    MethodNotAllowed = 3000,

    // Resources (4000-4999)
    /// The requested record does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External services (5000-5999)
    /// The provider token endpoint rejected an authorization code
    #[serde(rename = "TOKEN_EXCHANGE_FAILED")]
    TokenExchangeFailed = 5000,
    /// The provider token endpoint rejected a refresh token
    #[serde(rename = "TOKEN_REFRESH_FAILED")]
    TokenRefreshFailed = 5001,
    /// An external service failed in a way the caller cannot fix
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5002,

    // Configuration (6000-6999)
    /// Configuration could not be parsed
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// A required configuration value is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal (9000-9999)
    /// Unclassified internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Connection storage failed
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// JSON encoding or decoding failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::TokenExchangeFailed | Self::TokenRefreshFailed => 400,
            Self::AuthRequired | Self::AuthInvalid => 401,
            Self::ResourceNotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::ExternalServiceError
            | Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Fixed message returned to the caller for this code
    #[must_use]
    pub const fn client_message(self) -> &'static str {
        match self {
            Self::AuthRequired | Self::AuthInvalid => error_messages::UNAUTHORIZED,
            Self::TokenExchangeFailed => error_messages::TOKEN_EXCHANGE_FAILED,
            Self::TokenRefreshFailed => error_messages::TOKEN_REFRESH_FAILED,
            Self::ResourceNotFound => error_messages::CONNECTION_NOT_FOUND,
            Self::MethodNotAllowed => error_messages::METHOD_NOT_ALLOWED,
            Self::DatabaseError => error_messages::PERSISTENCE_FAILED,
            Self::ExternalServiceError
            | Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::SerializationError => error_messages::INTERNAL_ERROR,
        }
    }

    /// Human-readable description used in logs
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided session token is invalid",
            Self::MethodNotAllowed => "The HTTP method is not supported on this route",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::TokenExchangeFailed => "Provider rejected the authorization code",
            Self::TokenRefreshFailed => "Provider rejected the refresh token",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Connection storage failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Internal detail, logged but never sent to the caller
    pub message: String,
    /// Source error for error chaining
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Fixed message safe to show to the caller
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        self.code.client_message()
    }

    /// Authentication required (no bearer token)
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Session token rejected by the identity service
    #[must_use]
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Authorization-code exchange rejected by the provider
    #[must_use]
    pub fn token_exchange(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TokenExchangeFailed, message)
    }

    /// Refresh-token grant rejected by the provider
    #[must_use]
    pub fn token_refresh(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TokenRefreshFailed, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Method not allowed on the route
    #[must_use]
    pub fn method_not_allowed(method: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::MethodNotAllowed,
            format!("Unsupported method {method}"),
        )
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Storage error
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Missing configuration value
    #[must_use]
    pub fn config_missing(variable: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("Missing required environment variable {variable}"),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// JSON error body: `{"error": "<fixed message>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Fixed client-facing message
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.client_message().to_owned(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string()).with_source(error)
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, "{self}");
        } else {
            tracing::warn!(code = ?self.code, "{self}");
        }

        if status == http::StatusCode::UNAUTHORIZED {
            return (status, error_messages::UNAUTHORIZED).into_response();
        }

        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}
