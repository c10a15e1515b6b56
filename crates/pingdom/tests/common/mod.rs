//! In-process fake of the Pingdom checks API
//!
//! Runs on a random loopback port and keeps checks in memory. Requests must
//! carry the expected Basic Auth credentials and `App-Key` header.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine;
use pingdom::{Check, CheckStatus};
use serde_json::json;

pub const USERNAME: &str = "user@example.com";
pub const PASSWORD: &str = "secret";
pub const APP_KEY: &str = "app-key-123";

/// Identifier for which the fake answers with a non-JSON error page
pub const BROKEN_ID: u64 = 999;

#[derive(Default)]
pub struct FakeApi {
    pub checks: Vec<Check>,
    pub next_id: u64,
    pub queries: Vec<String>,
}

pub type Shared = Arc<Mutex<FakeApi>>;

fn error(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": {
            "statuscode": status.as_u16(),
            "statusdesc": status.canonical_reason().unwrap_or(""),
            "errormessage": message,
        }
    });
    (status, Json(body)).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    let credentials = base64::engine::general_purpose::STANDARD
        .encode(format!("{}:{}", USERNAME, PASSWORD));
    let expected = format!("Basic {}", credentials);
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    header("authorization") == Some(expected.as_str()) && header("app-key") == Some(APP_KEY)
}

async fn list(State(api): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::FORBIDDEN, "Invalid credentials");
    }
    let api = api.lock().unwrap();
    Json(json!({ "checks": api.checks })).into_response()
}

async fn create(
    State(api): State<Shared>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::FORBIDDEN, "Invalid credentials");
    }
    let mut api = api.lock().unwrap();
    api.queries.push(raw.unwrap_or_default());

    let (Some(name), Some(host)) = (params.get("name"), params.get("host")) else {
        return error(StatusCode::BAD_REQUEST, "name and host are required");
    };
    if params.get("type").map(String::as_str) != Some("http") {
        return error(StatusCode::BAD_REQUEST, "type must be http");
    }

    api.next_id += 1;
    let check = Check {
        id: api.next_id,
        resolution: 5,
        created: 1_700_000_000,
        status: Some(CheckStatus::Unknown),
        ..Check::new(name.clone(), host.clone())
    };
    api.checks.push(check.clone());
    Json(json!({ "check": check })).into_response()
}

async fn read(State(api): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::FORBIDDEN, "Invalid credentials");
    }
    if id == BROKEN_ID {
        return (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response();
    }
    let api = api.lock().unwrap();
    match api.checks.iter().find(|c| c.id == id) {
        Some(check) => Json(json!({ "check": check })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Check not found"),
    }
}

async fn update(
    State(api): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::FORBIDDEN, "Invalid credentials");
    }
    let mut api = api.lock().unwrap();
    api.queries.push(raw.unwrap_or_default());

    if params.contains_key("type") {
        return error(StatusCode::BAD_REQUEST, "type cannot be changed");
    }
    let Some(check) = api.checks.iter_mut().find(|c| c.id == id) else {
        return error(StatusCode::NOT_FOUND, "Check not found");
    };
    if let Some(name) = params.get("name") {
        check.name = name.clone();
    }
    if let Some(host) = params.get("host") {
        check.hostname = host.clone();
    }
    Json(json!({ "message": "Modification of check was successful!" })).into_response()
}

async fn delete(State(api): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    if !authorized(&headers) {
        return error(StatusCode::FORBIDDEN, "Invalid credentials");
    }
    let mut api = api.lock().unwrap();
    let before = api.checks.len();
    api.checks.retain(|c| c.id != id);
    if api.checks.len() == before {
        return error(StatusCode::NOT_FOUND, "Check not found");
    }
    Json(json!({ "message": "Deletion of check was successful!" })).into_response()
}

pub async fn spawn_fake_api() -> (String, Shared) {
    let state = Shared::default();
    let router = Router::new()
        .route("/api/2.0/checks", get(list).post(create))
        .route(
            "/api/2.0/checks/{id}",
            get(read).put(update).delete(delete),
        )
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), state)
}
