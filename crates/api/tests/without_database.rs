//! Behaviour that must hold even when the database is unreachable.
//!
//! The pool points at a closed port, so anything that reaches the
//! repository layer fails with a connection error.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, get, post_form, send, Part, RecordingFileStore, EVENTS_URI,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy("postgres://eventboard@127.0.0.1:1/eventboard")
        .unwrap()
}

fn app(files: Arc<RecordingFileStore>) -> axum::Router {
    let storage = std::env::temp_dir();
    build_test_app(unreachable_pool(), files, &storage)
}

#[tokio::test]
async fn list_reports_connection_failure_with_details() {
    let response = get(app(Arc::default()), EVENTS_URI).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "DB connection failed");
    assert_eq!(json["code"], "DB_CONNECTION_FAILED");
    assert!(json["details"].is_string());
}

#[tokio::test]
async fn health_is_degraded() {
    let json = body_json(get(app(Arc::default()), "/health").await).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"]["reachable"], false);
    assert!(json["database"].get("events").is_none());
    assert_eq!(json["storage"]["available"], true);
}

#[tokio::test]
async fn put_is_rejected_before_touching_storage() {
    let response = send(app(Arc::default()), Method::PUT, EVENTS_URI).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn validation_runs_before_any_file_is_stored() {
    let files = Arc::new(RecordingFileStore::default());
    let response = post_form(
        app(Arc::clone(&files)),
        EVENTS_URI,
        &[
            Part::Text("title", ""),
            Part::Text("date", "2025-01-10"),
            Part::File("image", "photo.png", b"PNG"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(files.urls().is_empty());
}
