// ABOUTME: Local fake provider upstream for provider integration tests
// ABOUTME: Serves canned token/profile responses and records what the client sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request the fake upstream received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub form: HashMap<String, String>,
}

/// Canned upstream responses
#[derive(Clone)]
pub struct FakeUpstream {
    pub token_status: StatusCode,
    pub token_body: Value,
    pub profile_status: StatusCode,
    pub profile_body: Value,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    pub fn new(token_body: Value, profile_body: Value) -> Self {
        Self {
            token_status: StatusCode::OK,
            token_body,
            profile_status: StatusCode::OK,
            profile_body,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_token_status(mut self, status: StatusCode) -> Self {
        self.token_status = status;
        self
    }

    pub fn with_profile_status(mut self, status: StatusCode) -> Self {
        self.profile_status = status;
        self
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port and return the base URL
    pub async fn spawn(&self, token_path: &'static str, profile_path: &'static str) -> String {
        let app = Router::new()
            .route(token_path, post(token_handler))
            .route(profile_path, get(profile_handler))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

async fn token_handler(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let form = body
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_owned(), v.replace('+', " ")))
        .collect();
    upstream.requests.lock().unwrap().push(RecordedRequest {
        path: "token".to_owned(),
        authorization: authorization(&headers),
        form,
    });
    (upstream.token_status, Json(upstream.token_body.clone()))
}

async fn profile_handler(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
) -> impl IntoResponse {
    upstream.requests.lock().unwrap().push(RecordedRequest {
        path: "profile".to_owned(),
        authorization: authorization(&headers),
        form: HashMap::new(),
    });
    (upstream.profile_status, Json(upstream.profile_body.clone()))
}
