// ABOUTME: In-process fakes for the identity service, connection store, and providers
// ABOUTME: Each fake counts its calls so tests can assert which steps ran
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wearable_link::auth::IdentityService;
use wearable_link::config::ServerConfig;
use wearable_link::database::ConnectionStore;
use wearable_link::errors::{AppError, AppResult};
use wearable_link::models::{
    AuthenticatedUser, AuthorizationGrant, ExternalConnection, ProfileInfo, ProviderKind, TokenSet,
};
use wearable_link::providers::{
    LinkingProvider, ProviderConfig, ProviderError, ProviderRegistry, ProviderResult,
};
use wearable_link::resources::ServerResources;
use wearable_link::server::LinkServer;

pub const VALID_TOKEN: &str = "session-token-1";
pub const USER_ID: &str = "user-1";

// ============================================================================
// Identity
// ============================================================================

/// Identity service accepting a fixed set of tokens
#[derive(Default)]
pub struct FakeIdentity {
    users: HashMap<String, AuthenticatedUser>,
    calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn with_user(mut self, token: &str, user_id: &str) -> Self {
        self.users.insert(
            token.to_owned(),
            AuthenticatedUser {
                id: user_id.to_owned(),
                email: Some(format!("{user_id}@example.com")),
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn resolve_user(&self, token: &str) -> AppResult<AuthenticatedUser> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::auth_invalid("unknown session token"))
    }
}

// ============================================================================
// Store
// ============================================================================

/// Map-backed store keyed on `(user_id, provider)`
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<(String, ProviderKind), ExternalConnection>>,
    upserts: AtomicUsize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, user_id: &str, provider: ProviderKind) -> Option<ExternalConnection> {
        self.rows
            .lock()
            .unwrap()
            .get(&(user_id.to_owned(), provider))
            .cloned()
    }

    pub fn insert(&self, connection: ExternalConnection) {
        self.rows.lock().unwrap().insert(
            (connection.user_id.clone(), connection.provider),
            connection,
        );
    }
}

#[async_trait]
impl ConnectionStore for MemoryStore {
    async fn upsert_connection(&self, connection: &ExternalConnection) -> AppResult<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(AppError::database("disk I/O error at /var/lib/secret.db"));
        }
        self.insert(connection.clone());
        Ok(())
    }

    async fn get_connection(
        &self,
        user_id: &str,
        provider: ProviderKind,
    ) -> AppResult<Option<ExternalConnection>> {
        Ok(self.get(user_id, provider))
    }

    fn backend_info(&self) -> &'static str {
        "memory"
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Scripted provider; every call is recorded
pub struct FakeProvider {
    config: ProviderConfig,
    tokens: Mutex<Vec<TokenSet>>,
    reject_exchange: bool,
    reject_refresh: bool,
    profile: Option<ProfileInfo>,
    pub grants: Mutex<Vec<AuthorizationGrant>>,
    pub refresh_tokens_seen: Mutex<Vec<String>>,
    exchange_calls: AtomicUsize,
    profile_calls: AtomicUsize,
}

pub fn token_set(access: &str, refresh: &str) -> TokenSet {
    TokenSet {
        access_token: access.to_owned(),
        refresh_token: refresh.to_owned(),
        expires_in: 3600,
        scope: Some("activity".to_owned()),
        provider_user_id: None,
    }
}

impl FakeProvider {
    pub fn new(kind: ProviderKind) -> Self {
        let config = match kind {
            ProviderKind::Fitbit => ProviderConfig::fitbit("fitbit-id", "fitbit-secret"),
            ProviderKind::Oura => ProviderConfig::oura("oura-id", "oura-secret"),
        };
        Self {
            config,
            tokens: Mutex::new(vec![token_set("t1", "r1")]),
            reject_exchange: false,
            reject_refresh: false,
            profile: Some(ProfileInfo {
                account_id: Some("XYZ".to_owned()),
                display_name: None,
            }),
            grants: Mutex::new(Vec::new()),
            refresh_tokens_seen: Mutex::new(Vec::new()),
            exchange_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
        }
    }

    /// Token sets returned in order; the last one repeats
    pub fn with_tokens(self, tokens: Vec<TokenSet>) -> Self {
        Self {
            tokens: Mutex::new(tokens),
            ..self
        }
    }

    pub fn rejecting_exchange(self) -> Self {
        Self {
            reject_exchange: true,
            ..self
        }
    }

    pub fn rejecting_refresh(self) -> Self {
        Self {
            reject_refresh: true,
            ..self
        }
    }

    /// `None` makes the profile endpoint fail
    pub fn with_profile(self, profile: Option<ProfileInfo>) -> Self {
        Self { profile, ..self }
    }

    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    fn next_tokens(&self) -> TokenSet {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.len() > 1 {
            tokens.remove(0)
        } else {
            tokens[0].clone()
        }
    }

    fn rejection(&self) -> ProviderError {
        ProviderError::TokenEndpoint {
            provider: self.config.kind.to_string(),
            status_code: 400,
            body: r#"{"errors":[{"errorType":"invalid_grant"}]}"#.to_owned(),
        }
    }
}

#[async_trait]
impl LinkingProvider for FakeProvider {
    fn kind(&self) -> ProviderKind {
        self.config.kind
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn exchange_code(&self, grant: &AuthorizationGrant) -> ProviderResult<TokenSet> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        self.grants.lock().unwrap().push(grant.clone());
        if self.reject_exchange {
            return Err(self.rejection());
        }
        Ok(self.next_tokens())
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> ProviderResult<TokenSet> {
        self.refresh_tokens_seen
            .lock()
            .unwrap()
            .push(refresh_token.to_owned());
        if self.reject_refresh {
            return Err(self.rejection());
        }
        Ok(self.next_tokens())
    }

    async fn fetch_profile(&self, _access_token: &str) -> ProviderResult<ProfileInfo> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile.clone().ok_or_else(|| ProviderError::ApiError {
            provider: self.config.kind.to_string(),
            status_code: 500,
            body: "upstream unavailable".to_owned(),
        })
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Configuration with the local `SQLite` store selected; routes never touch it
pub fn test_config() -> ServerConfig {
    let vars: HashMap<&str, &str> = [
        ("BACKEND_URL", "http://127.0.0.1:9"),
        ("BACKEND_ANON_KEY", "anon-key"),
        ("CONNECTION_STORE", "sqlite"),
        ("DATABASE_URL", "sqlite::memory:"),
        ("CORS_ALLOWED_ORIGIN", "*"),
    ]
    .into_iter()
    .collect();
    ServerConfig::from_vars(|key| vars.get(key).map(|v| (*v).to_owned())).unwrap()
}

/// Everything a route test needs to assert on
pub struct Harness {
    pub identity: Arc<FakeIdentity>,
    pub store: Arc<MemoryStore>,
    pub providers: Vec<Arc<FakeProvider>>,
    pub resources: Arc<ServerResources>,
}

impl Harness {
    pub fn new(providers: Vec<FakeProvider>) -> Self {
        Self::with_store(providers, MemoryStore::default())
    }

    pub fn with_store(providers: Vec<FakeProvider>, store: MemoryStore) -> Self {
        let identity = Arc::new(FakeIdentity::default().with_user(VALID_TOKEN, USER_ID));
        let store = Arc::new(store);
        let providers: Vec<Arc<FakeProvider>> = providers.into_iter().map(Arc::new).collect();

        let mut registry = ProviderRegistry::new();
        for provider in &providers {
            registry.register(Arc::clone(provider) as Arc<dyn LinkingProvider>);
        }

        let resources = Arc::new(ServerResources::new(
            test_config(),
            registry,
            Arc::clone(&identity) as Arc<dyn IdentityService>,
            Arc::clone(&store) as Arc<dyn ConnectionStore>,
        ));

        Self {
            identity,
            store,
            providers,
            resources,
        }
    }

    pub fn provider(&self, index: usize) -> &FakeProvider {
        &self.providers[index]
    }

    pub fn router(&self) -> axum::Router {
        LinkServer::router(Arc::clone(&self.resources))
    }
}
