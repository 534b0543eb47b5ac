//! Helpers for driving the router in tests.

use crate::db::{self, DbPool};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn app(pool: DbPool) -> Router {
    super::router().with_state(Arc::new(pool))
}

/// Router on a throwaway transaction, or `None` without `TEST_DATABASE_URL`.
///
/// Tests using it are `#[ignore]`d; run them with `cargo test -- --ignored`.
pub fn db_app() -> Option<Router> {
    match db::test_pool() {
        Some(pool) => Some(app(pool)),
        None => {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            None
        }
    }
}

/// Router whose pool never connects.
pub fn offline_app() -> Router {
    app(db::unconnected_pool())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .unwrap();

    send_request(app, request).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();

    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

/// Names of the ingredients in a recipe response, in response order.
pub fn ingredient_names(recipe: &Value) -> Vec<String> {
    recipe["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect()
}
