//! Shared harness for the HTTP integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use eventboard_api::app::build_app;
use eventboard_api::config::ServerConfig;
use eventboard_api::file_store::FileStore;
use eventboard_api::state::AppState;
use eventboard_core::images::{generate_filename, url_for};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const EVENTS_URI: &str = "/api/v1/events";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        storage_root: storage_root.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build the full application router, the same one `main.rs` serves.
pub fn build_test_app(pool: PgPool, files: Arc<dyn FileStore>, storage_root: &Path) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config(storage_root)),
        files,
    };
    build_app(state)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri).await
}

/// One part of a `multipart/form-data` body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

const BOUNDARY: &str = "eventboard-test-boundary";

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_form(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fake file stores
// ---------------------------------------------------------------------------

/// In-memory store that records every call.
#[derive(Default)]
pub struct RecordingFileStore {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    pub removed: Mutex<Vec<String>>,
}

impl RecordingFileStore {
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        urls.sort();
        urls
    }
}

#[async_trait]
impl FileStore for RecordingFileStore {
    async fn store(&self, bytes: &[u8], ext: Option<&str>) -> io::Result<String> {
        let url = url_for(&generate_filename(ext));
        self.files
            .lock()
            .unwrap()
            .insert(url.clone(), bytes.to_vec());
        Ok(url)
    }

    async fn remove(&self, url: &str) -> io::Result<bool> {
        self.removed.lock().unwrap().push(url.to_string());
        Ok(self.files.lock().unwrap().remove(url).is_some())
    }
}

/// Store whose disk is always full.
pub struct FailingFileStore;

#[async_trait]
impl FileStore for FailingFileStore {
    async fn store(&self, _bytes: &[u8], _ext: Option<&str>) -> io::Result<String> {
        Err(io::Error::other("disk full"))
    }

    async fn remove(&self, _url: &str) -> io::Result<bool> {
        Err(io::Error::other("disk full"))
    }
}
