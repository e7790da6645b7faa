// ABOUTME: SQLite connection store with idempotent migration and upsert
// ABOUTME: Stores settings as JSON text and timestamps as RFC 3339 text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConnectionStore;
use crate::errors::{AppError, AppResult};
use crate::models::{ExternalConnection, ProviderKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// `SQLite` database holding the `external_connections` table
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns a database error if the URL is invalid, the file cannot be
    /// opened, or the migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let in_memory = is_memory_url(database_url);
        if !in_memory {
            ensure_parent_dir(database_url)?;
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` is its own database, so pin the pool to one
        // connection that is never recycled.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.migrate().await?;

        info!(in_memory, "SQLite connection store ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create the `external_connections` table and its indexes
    ///
    /// # Errors
    ///
    /// Returns an error if the schema migration fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS external_connections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                provider TEXT NOT NULL CHECK (provider IN ('fitbit', 'oura')),
                access_token TEXT NOT NULL,
                refresh_token TEXT NOT NULL,
                token_expires_at TEXT NOT NULL,
                device_id TEXT NOT NULL,
                device_name TEXT NOT NULL,
                settings TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, provider)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_external_connections_user ON external_connections(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of stored connections for one user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_connections(&self, user_id: &str) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM external_connections WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    fn row_to_connection(row: &SqliteRow) -> AppResult<ExternalConnection> {
        let provider: String = row.try_get("provider")?;
        let provider = ProviderKind::from_str(&provider)
            .map_err(|_| AppError::database(format!("Unknown provider '{provider}' in row")))?;
        let settings: String = row.try_get("settings")?;

        Ok(ExternalConnection {
            user_id: row.try_get("user_id")?,
            provider,
            access_token: row.try_get("access_token")?,
            refresh_token: row.try_get("refresh_token")?,
            token_expires_at: row.try_get::<DateTime<Utc>, _>("token_expires_at")?,
            device_id: row.try_get("device_id")?,
            device_name: row.try_get("device_name")?,
            settings: serde_json::from_str(&settings)
                .map_err(|e| AppError::database(format!("Corrupt settings JSON: {e}")))?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl ConnectionStore for Database {
    async fn upsert_connection(&self, connection: &ExternalConnection) -> AppResult<()> {
        let settings = serde_json::to_string(&connection.settings)
            .map_err(|e| AppError::database(format!("Unserializable settings: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO external_connections (
                user_id, provider, access_token, refresh_token, token_expires_at,
                device_id, device_name, settings, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, provider)
            DO UPDATE SET
                access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                token_expires_at = EXCLUDED.token_expires_at,
                device_id = EXCLUDED.device_id,
                device_name = EXCLUDED.device_name,
                settings = EXCLUDED.settings,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(&connection.user_id)
        .bind(connection.provider.as_str())
        .bind(&connection.access_token)
        .bind(&connection.refresh_token)
        .bind(connection.token_expires_at)
        .bind(&connection.device_id)
        .bind(&connection.device_name)
        .bind(settings)
        .bind(connection.updated_at)
        .execute(&self.pool)
        .await?;

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
        let row = sqlx::query(
            r"
            SELECT user_id, provider, access_token, refresh_token, token_expires_at,
                   device_id, device_name, settings, updated_at
            FROM external_connections
            WHERE user_id = $1 AND provider = $2
            ",
        )
        .bind(user_id)
        .bind(provider.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_connection).transpose()
    }

    fn backend_info(&self) -> &'static str {
        "SQLite (Local)"
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create the directory holding a file-backed database
fn ensure_parent_dir(database_url: &str) -> AppResult<()> {
    let path = database_url
        .trim_start_matches("sqlite:")
        .trim_start_matches("//")
        .split('?')
        .next()
        .unwrap_or_default();

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::database(format!(
                    "Cannot create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}
