//! In-process stand-in for the upstream API.
//!
//! Binds an ephemeral port, answers the token endpoint and a catch-all
//! JSON endpoint, and records what every request carried so tests can
//! assert on the forwarded form fields, method, path and headers.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

/// What the mock saw in a single request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub form: HashMap<String, String>,
}

#[derive(Debug)]
struct MockState {
    token_status: u16,
    token_body: Value,
    api_status: u16,
    api_body: Value,
    api_raw_body: Option<(String, String)>,
    requests: RwLock<Vec<RecordedRequest>>,
}

/// Builder for a mock upstream with configurable responses.
pub struct MockUpstream {
    token_status: u16,
    token_body: Value,
    api_status: u16,
    api_body: Value,
    api_raw_body: Option<(String, String)>,
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            token_status: 200,
            token_body: json!({
                "access_token": "test-access-token",
                "token_type": "bearer",
                "expires_in": 7200,
            }),
            api_status: 200,
            api_body: json!({ "accounts": [] }),
            api_raw_body: None,
        }
    }

    pub fn with_token_status(mut self, status: u16) -> Self {
        self.token_status = status;
        self
    }

    pub fn with_token_body(mut self, body: Value) -> Self {
        self.token_body = body;
        self
    }

    pub fn with_api_status(mut self, status: u16) -> Self {
        self.api_status = status;
        self
    }

    pub fn with_api_body(mut self, body: Value) -> Self {
        self.api_body = body;
        self
    }

    /// Answer API calls with a verbatim body instead of JSON.
    pub fn with_api_raw_body(mut self, content_type: &str, body: &str) -> Self {
        self.api_raw_body = Some((content_type.to_string(), body.to_string()));
        self
    }

    /// Bind an ephemeral port and serve in the background.
    pub async fn start(self) -> MockUpstreamHandle {
        let state = Arc::new(MockState {
            token_status: self.token_status,
            token_body: self.token_body,
            api_status: self.api_status,
            api_body: self.api_body,
            api_raw_body: self.api_raw_body,
            requests: RwLock::new(Vec::new()),
        });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream addr");

        let serve_state = Arc::clone(&state);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let state = Arc::clone(&serve_state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle(req, &state).await }
                    });
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        MockUpstreamHandle { addr, state }
    }
}

/// Running mock with access to its captured requests.
pub struct MockUpstreamHandle {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockUpstreamHandle {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn request_count(&self) -> usize {
        self.state.requests.read().await.len()
    }

    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.read().await.last().cloned()
    }
}

async fn handle(
    req: Request<Incoming>,
    state: &MockState,
) -> Result<Response<Full<Bytes>>, std::convert::Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let body = req
        .into_body()
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .unwrap_or_default();
    let form: HashMap<String, String> = url::form_urlencoded::parse(&body).into_owned().collect();

    let is_token_request = method == "POST" && path == "/api/v1/oauth/token";

    state.requests.write().await.push(RecordedRequest {
        method,
        path,
        authorization,
        form,
    });

    let (status, content_type, payload) = if is_token_request {
        (
            state.token_status,
            "application/json".to_string(),
            state.token_body.to_string(),
        )
    } else if let Some((content_type, body)) = &state.api_raw_body {
        (state.api_status, content_type.clone(), body.clone())
    } else {
        (
            state.api_status,
            "application/json".to_string(),
            state.api_body.to_string(),
        )
    };

    let response = Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .body(Full::new(Bytes::from(payload)))
        .expect("build mock response");

    Ok(response)
}
