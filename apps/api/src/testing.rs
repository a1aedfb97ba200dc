//! Test doubles shared by handler and client tests: an in-process Gemini
//! mock and a rasterizer stub.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    http::{HeaderMap, StatusCode, Uri},
    Json, Router,
};
use bytes::Bytes;
use serde_json::{json, Value};

use crate::llm_client::LlmClient;
use crate::pdf::{PageRasterizer, RasterError};
use crate::state::AppState;
use crate::ui::templates::build_templates;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

/// A `generateContent` stand-in bound to an ephemeral local port.
pub struct MockGemini {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockGemini {
    pub async fn spawn_replying(text: &str) -> Self {
        Self::spawn_with_status(
            200,
            json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": text}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 1300, "candidatesTokenCount": 40}
            }),
        )
        .await
    }

    pub async fn spawn_with_status(status: u16, body: Value) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let shared = recorded.clone();
        let status = StatusCode::from_u16(status).unwrap();

        let app = Router::new().fallback(
            move |headers: HeaderMap, uri: Uri, Json(payload): Json<Value>| {
                let shared = shared.clone();
                let body = body.clone();
                async move {
                    shared.lock().unwrap().push(RecordedRequest {
                        path: uri.path().to_string(),
                        api_key: headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(String::from),
                        body: payload,
                    });
                    (status, Json(body))
                }
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v1beta"),
            recorded,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.requests().last().and_then(|r| r.api_key.clone())
    }
}

/// Returns a fixed JPEG for every PDF-looking upload.
pub struct StubRasterizer {
    pub jpeg: Vec<u8>,
    calls: AtomicUsize,
}

impl StubRasterizer {
    pub fn new() -> Self {
        Self {
            jpeg: vec![0xFF, 0xD8, 0xFF, 0xE0],
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRasterizer for StubRasterizer {
    async fn first_page_jpeg(&self, pdf: Bytes) -> Result<Vec<u8>, RasterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !crate::pdf::looks_like_pdf(&pdf) {
            return Err(RasterError::NotAPdf);
        }
        Ok(self.jpeg.clone())
    }
}

pub fn test_state(gemini_base: &str, rasterizer: Arc<StubRasterizer>) -> AppState {
    AppState {
        llm: LlmClient::new("test-key".to_string(), gemini_base).unwrap(),
        rasterizer,
        templates: Arc::new(build_templates().unwrap()),
    }
}

pub const BOUNDARY: &str = "----ats-test-boundary";

/// A multipart form field: `(name, file_name, content)`.
pub type FormField<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(fields: &[FormField<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, fields: &[FormField<'_>]) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(axum::body::Body::from(multipart_body(fields)))
        .unwrap()
}

pub const SAMPLE_PDF: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n";
