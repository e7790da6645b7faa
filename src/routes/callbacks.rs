// ABOUTME: Provider OAuth callback and refresh route handlers
// ABOUTME: Authenticate the caller, parse the body, then delegate to the linking service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Provider callback routes
//!
//! For every registered provider `{p}`:
//!
//! - `POST /functions/v1/{p}-callback` with `{ "code", "state"? }` links the account
//! - `POST /functions/v1/{p}-refresh` refreshes the stored tokens
//! - `OPTIONS` on either path answers the CORS preflight without authentication
//! - any other method answers 405
//!
//! All responses from these routes carry the fixed CORS header set.

use crate::auth::authenticate;
use crate::constants::routes::FUNCTIONS_PREFIX;
use crate::errors::{AppError, AppResult};
use crate::middleware::with_cors_headers;
use crate::models::{AuthorizationGrant, ProviderKind};
use crate::providers::LinkingProvider;
use crate::resources::ServerResources;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{post, MethodRouter},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Provider callback and refresh routes
pub struct CallbackRoutes;

impl CallbackRoutes {
    /// Create callback and refresh routes for every registered provider
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let mut router = Router::new();

        for kind in resources.providers.kinds() {
            router = router
                .route(&Self::callback_path(kind), Self::callback_method_router(kind))
                .route(&Self::refresh_path(kind), Self::refresh_method_router(kind));
            info!(provider = %kind, path = %Self::callback_path(kind), "Mounted callback route");
        }

        with_cors_headers(router, &resources.config.cors).with_state(resources)
    }

    /// `/functions/v1/{provider}-callback`
    #[must_use]
    pub fn callback_path(kind: ProviderKind) -> String {
        format!("{FUNCTIONS_PREFIX}/{kind}-callback")
    }

    /// `/functions/v1/{provider}-refresh`
    #[must_use]
    pub fn refresh_path(kind: ProviderKind) -> String {
        format!("{FUNCTIONS_PREFIX}/{kind}-refresh")
    }

    fn callback_method_router(kind: ProviderKind) -> MethodRouter<Arc<ServerResources>> {
        post(
            move |State(resources): State<Arc<ServerResources>>,
                  headers: HeaderMap,
                  body: Bytes| async move {
                Self::handle_callback(kind, &resources, &headers, &body).await
            },
        )
        .options(Self::handle_preflight)
        .fallback(Self::handle_method_not_allowed)
    }

    fn refresh_method_router(kind: ProviderKind) -> MethodRouter<Arc<ServerResources>> {
        post(
            move |State(resources): State<Arc<ServerResources>>, headers: HeaderMap| async move {
                Self::handle_refresh(kind, &resources, &headers).await
            },
        )
        .options(Self::handle_preflight)
        .fallback(Self::handle_method_not_allowed)
    }

    /// Complete the authorization-code flow for `kind`
    async fn handle_callback(
        kind: ProviderKind,
        resources: &ServerResources,
        headers: &HeaderMap,
        body: &[u8],
    ) -> AppResult<Response> {
        // Authenticate before looking at the body
        let user = authenticate(resources.identity.as_ref(), headers).await?;
        let grant: AuthorizationGrant = serde_json::from_slice(body)?;
        let provider = Self::provider(resources, kind)?;

        resources
            .linker
            .link_account(provider.as_ref(), &user, &grant)
            .await?;

        Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
    }

    /// Refresh the stored tokens for `kind`
    async fn handle_refresh(
        kind: ProviderKind,
        resources: &ServerResources,
        headers: &HeaderMap,
    ) -> AppResult<Response> {
        let user = authenticate(resources.identity.as_ref(), headers).await?;
        let provider = Self::provider(resources, kind)?;

        let connection = resources
            .linker
            .refresh_connection(provider.as_ref(), &user)
            .await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "token_expires_at": connection.token_expires_at.to_rfc3339(),
            })),
        )
            .into_response())
    }

    async fn handle_preflight() -> &'static str {
        "ok"
    }

    async fn handle_method_not_allowed(method: Method) -> AppError {
        AppError::method_not_allowed(method)
    }

    fn provider(
        resources: &ServerResources,
        kind: ProviderKind,
    ) -> AppResult<Arc<dyn LinkingProvider>> {
        resources
            .providers
            .get(kind)
            .ok_or_else(|| AppError::internal(format!("Provider {kind} is not registered")))
    }
}
