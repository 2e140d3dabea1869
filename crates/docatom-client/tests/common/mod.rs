//! In-process mock of the DocumentAtom service.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const PREFIX: &str = "/v1.0/mock";

/// One upload as seen by the server.
#[derive(Debug, Clone, Default)]
pub struct Received {
    pub path: String,
    pub query: Option<String>,
    pub field: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
    pub part_content_length: Option<String>,
    pub tenant: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockState {
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockState {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockServer {
    pub endpoint: String,
    pub state: MockState,
}

/// Start the mock on an ephemeral port.
pub async fn start() -> MockServer {
    let state = MockState::default();
    let router = Router::new()
        .route(&format!("{PREFIX}/"), get(probe))
        .route(&format!("{PREFIX}/typedetect"), post(type_detect))
        .route(&format!("{PREFIX}/atom/:format"), post(extract))
        .route(&format!("{PREFIX}/success"), post(success))
        .route(&format!("{PREFIX}/empty"), post(empty))
        .route(&format!("{PREFIX}/fail"), post(fail))
        .route(&format!("{PREFIX}/plain-error"), post(plain_error))
        .route(&format!("{PREFIX}/not-json"), post(not_json))
        .route(&format!("{PREFIX}/slow"), post(slow))
        .route(&format!("{PREFIX}/slow-body"), post(slow_body))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockServer {
        endpoint: format!("http://{addr}{PREFIX}"),
        state,
    }
}

/// Atoms every extraction endpoint answers with.
pub fn mock_atoms() -> Value {
    json!([
        {
            "GUID": "7f1d9a0e-6f1b-4c55-9d0e-2b2b6b0d6a11",
            "Type": "Text",
            "Position": 0,
            "Length": 29,
            "MD5Hash": "5d41402abc4b2a76b9719d911017c592",
            "SHA1Hash": "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d",
            "SHA256Hash": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
            "Formatting": "Paragraph",
            "Text": "Mock file content for testing"
        },
        {
            "GUID": "0c8f3e52-3f7a-4d0b-8a3e-8f1f7b9c2d44",
            "Type": "Table",
            "Position": 29,
            "Length": 12,
            "MD5Hash": "md5",
            "SHA1Hash": "sha1",
            "SHA256Hash": "sha256",
            "Formatting": "Table",
            "Text": "",
            "HeaderLevel": 2,
            "Quarks": [
                {
                    "ParentGUID": "0c8f3e52-3f7a-4d0b-8a3e-8f1f7b9c2d44",
                    "GUID": "e2b1c7a9-1d2f-4b8e-9a0c-5f6e7d8c9b10",
                    "Type": "Row",
                    "Position": 29,
                    "Length": 12,
                    "MD5Hash": "md5",
                    "SHA1Hash": "sha1",
                    "SHA256Hash": "sha256",
                    "Formatting": "Text",
                    "Text": "cell one"
                }
            ]
        }
    ])
}

pub fn mock_type_detection() -> Value {
    json!({ "MimeType": "application/pdf", "Extension": "pdf", "Type": "Pdf" })
}

pub fn mock_error() -> Value {
    json!({ "error": "File processing failed", "message": "Invalid file format", "code": 400 })
}

async fn record(
    state: &MockState,
    path: String,
    query: Option<String>,
    headers: &HeaderMap,
    mut multipart: Multipart,
) {
    state.hit();
    let mut received = Received {
        path,
        query,
        tenant: headers
            .get("x-tenant")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        ..Default::default()
    };

    if let Some(field) = multipart.next_field().await.unwrap() {
        received.field = field.name().unwrap_or_default().to_string();
        received.file_name = field.file_name().map(String::from);
        received.part_content_length = field
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        received.bytes = field.bytes().await.unwrap().to_vec();
    }

    state.received.lock().unwrap().push(received);
}

async fn delay_from(headers: &HeaderMap) {
    if let Some(ms) = headers
        .get("x-delay-ms")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
    {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

async fn probe(State(state): State<MockState>) -> StatusCode {
    state.hit();
    StatusCode::OK
}

async fn type_detect(
    State(state): State<MockState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Json<Value> {
    record(&state, "typedetect".to_string(), None, &headers, multipart).await;
    Json(mock_type_detection())
}

async fn extract(
    State(state): State<MockState>,
    Path(format): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    multipart: Multipart,
) -> Json<Value> {
    delay_from(&headers).await;
    record(&state, format!("atom/{format}"), query, &headers, multipart).await;
    Json(mock_atoms())
}

async fn success(State(state): State<MockState>, _body: Bytes) -> &'static str {
    state.hit();
    r#"{"success": true}"#
}

async fn empty(State(state): State<MockState>, _body: Bytes) -> StatusCode {
    state.hit();
    StatusCode::OK
}

async fn fail(State(state): State<MockState>, _body: Bytes) -> impl IntoResponse {
    state.hit();
    (StatusCode::BAD_REQUEST, Json(mock_error()))
}

async fn plain_error(State(state): State<MockState>, _body: Bytes) -> impl IntoResponse {
    state.hit();
    (StatusCode::INTERNAL_SERVER_ERROR, "")
}

async fn not_json(State(state): State<MockState>, _body: Bytes) -> &'static str {
    state.hit();
    "<html>definitely not json</html>"
}

async fn slow(State(state): State<MockState>, _body: Bytes) -> Json<Value> {
    state.hit();
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({}))
}

/// Answers at once but holds the body back for 400ms.
async fn slow_body(State(state): State<MockState>, _body: Bytes) -> Response {
    state.hit();
    let body = futures::stream::once(async {
        tokio::time::sleep(Duration::from_millis(400)).await;
        Ok::<_, std::io::Error>(Bytes::from_static(br#"{"success": true}"#))
    });
    Body::from_stream(body).into_response()
}
