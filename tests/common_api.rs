//! Health, readiness, and version routes.

mod helpers;

use axum::http::StatusCode;
use helpers::{get, send, test_app};

#[tokio::test]
async fn health_and_ready_answer_ok() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn version_reports_package_metadata() {
    let app = test_app().await;
    let (status, body) = send(&app, get("/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "campus-api");
}
