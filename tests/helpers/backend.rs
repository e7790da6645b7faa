// ABOUTME: Local fake of the hosted backend and a Fitbit upstream on one ephemeral port
// ABOUTME: Serves identity lookups, the external_connections REST table, and OAuth endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const ANON_KEY: &str = "anon-key";
pub const SERVICE_ROLE_KEY: &str = "service-role-key";

/// A request the fake backend received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Shared state behind the fake backend
#[derive(Clone, Default)]
pub struct FakeBackend {
    users: Arc<Mutex<HashMap<String, String>>>,
    rows: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    fail_table: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn with_user(self, token: &str, user_id: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(token.to_owned(), user_id.to_owned());
        self
    }

    pub fn fail_table_writes(&self) {
        self.fail_table.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert_row(&self, row: Value) {
        self.rows.lock().unwrap().push(row);
    }

    pub fn recorded(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Serve on an ephemeral port and return the base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/auth/v1/user", get(identity_handler))
            .route(
                "/rest/v1/external_connections",
                post(upsert_handler).get(select_handler),
            )
            .route("/oauth2/token", post(fitbit_token_handler))
            .route("/1/user/-/profile.json", get(fitbit_profile_handler))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn record(
        &self,
        method: &str,
        path: &str,
        query: Option<String>,
        headers: &HeaderMap,
        body: String,
    ) {
        let query = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        let headers = headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_owned(),
            path: path.to_owned(),
            query,
            headers,
            body,
        });
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

async fn identity_handler(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    backend.record("GET", "/auth/v1/user", None, &headers, String::new());

    let user_id = bearer(&headers).and_then(|token| backend.users.lock().unwrap().get(&token).cloned());
    match user_id {
        Some(id) => Json(json!({ "id": id, "email": format!("{id}@example.com"), "aud": "authenticated" }))
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        )
            .into_response(),
    }
}

async fn upsert_handler(
    State(backend): State<FakeBackend>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Response {
    backend.record(
        "POST",
        "/rest/v1/external_connections",
        query,
        &headers,
        body.clone(),
    );

    if backend.fail_table.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "relation \"external_connections\" is locked" })),
        )
            .into_response();
    }

    let Ok(row) = serde_json::from_str::<Value>(&body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut rows = backend.rows.lock().unwrap();
    rows.retain(|r| !(r["user_id"] == row["user_id"] && r["provider"] == row["provider"]));
    rows.push(row);
    StatusCode::CREATED.into_response()
}

async fn select_handler(
    State(backend): State<FakeBackend>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    backend.record(
        "GET",
        "/rest/v1/external_connections",
        query.clone(),
        &headers,
        String::new(),
    );

    let params: HashMap<String, String> = query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    let wanted = |key: &str| {
        params
            .get(key)
            .and_then(|v| v.strip_prefix("eq."))
            .map(str::to_owned)
    };
    let (user_id, provider) = (wanted("user_id"), wanted("provider"));

    let matching: Vec<Value> = backend
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|r| {
            user_id.as_deref().is_some_and(|u| r["user_id"] == u)
                && provider.as_deref().is_some_and(|p| r["provider"] == p)
        })
        .map(|r| {
            let mut row = r.clone();
            row["id"] = json!(1);
            row["created_at"] = json!("2025-01-01T00:00:00+00:00");
            row
        })
        .collect();
    Json(matching).into_response()
}

async fn fitbit_token_handler(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    body: String,
) -> Response {
    backend.record("POST", "/oauth2/token", None, &headers, body);
    Json(json!({
        "access_token": "fitbit-access",
        "refresh_token": "fitbit-refresh",
        "expires_in": 28800,
        "scope": "activity sleep",
        "token_type": "Bearer",
        "user_id": "XYZ"
    }))
    .into_response()
}

async fn fitbit_profile_handler(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    backend.record("GET", "/1/user/-/profile.json", None, &headers, String::new());
    Json(json!({ "user": { "encodedId": "XYZ", "displayName": "Charge 6" } })).into_response()
}
