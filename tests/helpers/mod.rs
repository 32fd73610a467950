//! Shared fixtures: an in-memory database and an in-process client for
//! the composed app.
#![allow(dead_code, reason = "shared helpers are reused across test suites")]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use campus_api::{app, ensure_schema, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

pub type TestApp = NormalizePath<Router>;

pub async fn test_app() -> TestApp {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    ensure_schema(&pool).await.expect("create schema");
    app(AppState { pool })
}

/// Drive one request through the app and decode the JSON body (Null for
/// empty bodies such as 204 responses).
pub async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("infallible");
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    json_request("POST", uri, body)
}

pub fn put_json(uri: &str, body: Value) -> Request<Body> {
    json_request("PUT", uri, body)
}

pub fn patch_json(uri: &str, body: Value) -> Request<Body> {
    json_request("PATCH", uri, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// POST a course and return its representation.
pub async fn create_course(app: &TestApp, name: &str) -> Value {
    let (status, body) = send(
        app,
        post_json("/api/v1/courses/", serde_json::json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

/// POST a student and return its id.
pub async fn create_student(app: &TestApp, name: &str) -> i64 {
    let (status, body) = send(
        app,
        post_json("/api/v1/students/", serde_json::json!({"name": name})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("student id")
}

pub fn ids_of(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect()
}
