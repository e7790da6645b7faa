// ABOUTME: Connection storage abstraction with backend REST and SQLite implementations
// ABOUTME: One external connection per (user_id, provider), written with an upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Connection Storage
//!
//! The linking flow persists through [`ConnectionStore`]. Two implementations exist:
//!
//! - [`RestConnectionStore`] writes to the hosted backend's REST API
//! - [`Database`] keeps connections in a local `SQLite` file
//!
//! Both upsert on `(user_id, provider)`, so re-linking a provider replaces the
//! previous record instead of adding a second one.

/// Backend REST API store
pub mod backend_rest;
/// Store selection from configuration
pub mod factory;
/// `SQLite` store
pub mod sqlite;

pub use backend_rest::RestConnectionStore;
pub use factory::create_store;
pub use sqlite::Database;

use crate::errors::AppResult;
use crate::models::{ExternalConnection, ProviderKind};
use async_trait::async_trait;

/// Persistence for linked provider accounts
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Insert or overwrite the connection for `(connection.user_id, connection.provider)`
    ///
    /// # Errors
    ///
    /// Returns a database error if the write fails
    async fn upsert_connection(&self, connection: &ExternalConnection) -> AppResult<()>;

    /// Load the connection for one user and provider
    ///
    /// # Errors
    ///
    /// Returns a database error if the read fails
    async fn get_connection(
        &self,
        user_id: &str,
        provider: ProviderKind,
    ) -> AppResult<Option<ExternalConnection>>;

    /// Short description of the backing store for logs
    fn backend_info(&self) -> &'static str;
}
