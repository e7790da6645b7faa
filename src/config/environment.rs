// ABOUTME: Environment configuration for the wearable link server
// ABOUTME: Parses backend, store, CORS, provider credential, and HTTP client settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::models::ProviderKind;
use crate::providers::ProviderConfig;
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};
use url::Url;

/// Backend-as-a-service endpoints and keys
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the backend project (identity service and REST API)
    pub url: String,
    /// Public anon key sent as `apikey` on identity lookups
    pub anon_key: String,
    /// Service-role key used for REST writes; required by the REST store
    pub service_role_key: Option<String>,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Where connections are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Backend REST API upsert on `external_connections`
    Rest,
    /// Local `SQLite` database
    Sqlite {
        /// sqlx connection string
        database_url: String,
    },
}

impl StoreBackend {
    /// Short name for logs and the summary
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

/// Fixed CORS header values
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin`
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: defaults::CORS_ALLOWED_ORIGIN.to_owned(),
        }
    }
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_CLIENT_TIMEOUT_SECS,
            connect_timeout_secs: defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Backend project settings
    pub backend: BackendConfig,
    /// Connection store selection
    pub store: StoreBackend,
    /// CORS header values
    pub cors: CorsConfig,
    /// Providers with complete client credentials
    pub providers: Vec<ProviderConfig>,
    /// Outbound HTTP client settings
    pub http_client: HttpClientConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing or invalid variable
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        let config = Self::from_vars(|key| env::var(key).ok())?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first missing or invalid variable
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| AppError::config_missing(key));

        let backend_url = required("BACKEND_URL")?;
        Url::parse(&backend_url)
            .map_err(|e| AppError::config(format!("BACKEND_URL is not a valid URL: {e}")))?;

        let backend = BackendConfig {
            url: backend_url.trim_end_matches('/').to_owned(),
            anon_key: required("BACKEND_ANON_KEY")?,
            service_role_key: var("BACKEND_SERVICE_ROLE_KEY"),
        };

        let store = match var("CONNECTION_STORE")
            .unwrap_or_else(|| "rest".to_owned())
            .to_ascii_lowercase()
            .as_str()
        {
            "rest" => StoreBackend::Rest,
            "sqlite" => StoreBackend::Sqlite {
                database_url: var("DATABASE_URL")
                    .unwrap_or_else(|| defaults::DATABASE_URL.to_owned()),
            },
            other => {
                return Err(AppError::config(format!(
                    "CONNECTION_STORE must be 'rest' or 'sqlite', got '{other}'"
                )))
            }
        };

        let config = Self {
            http_port: parse_or("HTTP_PORT", var("HTTP_PORT"), defaults::HTTP_PORT)?,
            backend,
            store,
            cors: CorsConfig {
                allowed_origin: var("CORS_ALLOWED_ORIGIN")
                    .unwrap_or_else(|| defaults::CORS_ALLOWED_ORIGIN.to_owned()),
            },
            providers: ProviderKind::ALL
                .into_iter()
                .filter_map(|kind| provider_config(kind, &var))
                .collect(),
            http_client: HttpClientConfig {
                timeout_secs: parse_or(
                    "HTTP_CLIENT_TIMEOUT_SECS",
                    var("HTTP_CLIENT_TIMEOUT_SECS"),
                    defaults::HTTP_CLIENT_TIMEOUT_SECS,
                )?,
                connect_timeout_secs: parse_or(
                    "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                    var("HTTP_CLIENT_CONNECT_TIMEOUT_SECS"),
                    defaults::HTTP_CLIENT_CONNECT_TIMEOUT_SECS,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error when the REST store is selected without a service-role key
    pub fn validate(&self) -> AppResult<()> {
        if self.store == StoreBackend::Rest && self.backend.service_role_key.is_none() {
            return Err(AppError::config_missing("BACKEND_SERVICE_ROLE_KEY"));
        }

        if self.providers.is_empty() {
            warn!("No provider credentials configured; no callback routes will be mounted");
        }

        Ok(())
    }

    /// Provider configuration for one kind, if its credentials are set
    #[must_use]
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.iter().find(|config| config.kind == kind)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let enabled = |kind| {
            if self.provider(kind).is_some() {
                "Enabled"
            } else {
                "Disabled"
            }
        };

        format!(
            "Wearable Link Server Configuration:\n\
             - HTTP Port: {}\n\
             - Backend: {}\n\
             - Connection Store: {}\n\
             - CORS Origin: {}\n\
             - Fitbit OAuth: {}\n\
             - Oura OAuth: {}\n\
             - HTTP Client Timeout: {}s (connect {}s)",
            self.http_port,
            self.backend.url,
            self.store.name(),
            self.cors.allowed_origin,
            enabled(ProviderKind::Fitbit),
            enabled(ProviderKind::Oura),
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

/// Build a provider configuration when both client id and secret are present
fn provider_config<F>(kind: ProviderKind, var: &F) -> Option<ProviderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = kind.as_str().to_ascii_uppercase();
    let client_id = var(&format!("{prefix}_CLIENT_ID"));
    let client_secret = var(&format!("{prefix}_CLIENT_SECRET"));

    match (client_id, client_secret) {
        (Some(id), Some(secret)) => {
            let config = match kind {
                ProviderKind::Fitbit => ProviderConfig::fitbit(id, secret),
                ProviderKind::Oura => ProviderConfig::oura(id, secret),
            };
            Some(config.with_redirect_uri(var(&format!("{prefix}_REDIRECT_URI"))))
        }
        (None, None) => None,
        _ => {
            warn!(provider = %kind, "Incomplete client credentials; provider disabled");
            None
        }
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> AppResult<T> {
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|_| AppError::config(format!("{key} has an invalid value '{raw}'")))
    })
}
