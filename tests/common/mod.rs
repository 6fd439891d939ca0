#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bank_account_service::api::{create_router, AppState};
use bank_account_service::config::DatabaseSettings;
use bank_account_service::repositories::{self, DbPool};
use serde_json::Value;
use tower::ServiceExt;

/// Fresh, migrated in-memory store. Each call gets its own database.
pub async fn setup_test_db() -> DbPool {
    repositories::connect(&DatabaseSettings::default())
        .await
        .expect("Failed to open in-memory store")
}

pub async fn setup_state() -> AppState {
    AppState::new(setup_test_db().await)
}

pub async fn setup_app() -> (Router, AppState) {
    let state = setup_state().await;
    (create_router(state.clone()), state)
}

/// Sends a request through the router and returns status and JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Router failed");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}
