// ABOUTME: Connection store backed by the hosted backend's REST API
// ABOUTME: Upserts with merge-duplicates on (user_id, provider) using the service-role key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConnectionStore;
use crate::config::BackendConfig;
use crate::constants::{headers, routes};
use crate::errors::{AppError, AppResult};
use crate::models::{ExternalConnection, ProviderKind};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, error};

/// Conflict target for the upsert
const ON_CONFLICT: &str = "user_id,provider";

/// Upsert preference understood by the REST layer
const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=minimal";

/// Store that writes through the backend REST API
pub struct RestConnectionStore {
    table_url: String,
    service_role_key: String,
    client: Client,
}

impl RestConnectionStore {
    /// Create a REST store
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no service-role key is configured
    pub fn new(backend: &BackendConfig, client: Client) -> AppResult<Self> {
        let service_role_key = backend
            .service_role_key
            .clone()
            .ok_or_else(|| AppError::config_missing("BACKEND_SERVICE_ROLE_KEY"))?;

        Ok(Self {
            table_url: format!("{}{}", backend.url, routes::CONNECTIONS_REST_PATH),
            service_role_key,
            client,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(headers::API_KEY, &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    async fn check(response: Response, operation: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(%status, operation, body = %body, "Backend REST call failed");
        Err(AppError::database(format!("{operation} returned {status}: {body}")))
    }
}

#[async_trait]
impl ConnectionStore for RestConnectionStore {
    async fn upsert_connection(&self, connection: &ExternalConnection) -> AppResult<()> {
        let request = self
            .client
            .post(&self.table_url)
            .query(&[("on_conflict", ON_CONFLICT)])
            .header("Prefer", PREFER_UPSERT)
            .json(connection);

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| AppError::database(format!("Backend unreachable: {e}")))?;
        Self::check(response, "upsert external_connections").await?;

        debug!(
            user_id = %connection.user_id,
            provider = %connection.provider,
            "Connection upserted"
        );
        Ok(())
    }

    async fn get_connection(
        &self,
        user_id: &str,
        provider: ProviderKind,
    ) -> AppResult<Option<ExternalConnection>> {
        let user_filter = format!("eq.{user_id}");
        let provider_filter = format!("eq.{provider}");
        let request = self.client.get(&self.table_url).query(&[
            ("select", "*"),
            ("user_id", user_filter.as_str()),
            ("provider", provider_filter.as_str()),
            ("limit", "1"),
        ]);

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| AppError::database(format!("Backend unreachable: {e}")))?;
        let response = Self::check(response, "select external_connections").await?;

        let rows: Vec<ExternalConnection> = response
            .json()
            .await
            .map_err(|e| AppError::database(format!("Unreadable connection rows: {e}")))?;

        Ok(rows.into_iter().next())
    }

    fn backend_info(&self) -> &'static str {
        "Backend REST API"
    }
}
