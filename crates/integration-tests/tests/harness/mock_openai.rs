//! Mock OpenAI Images backend for integration tests
//!
//! Serves `POST /v1/images/generations` with a canned behavior and records
//! what the relay sent

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// How the mock answers generation requests
#[derive(Clone)]
pub enum Behavior {
    /// 200 with one image whose URL is derived from the prompt
    Echo,
    /// 200 with one image at a fixed URL
    Image(String),
    /// Given status with a raw body
    Status(u16, String),
    /// 200 with a raw body
    RawSuccess(String),
    /// Sleep, then behave like `Echo`
    Slow(Duration),
}

/// Request as seen by the mock
#[derive(Debug, Clone)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

struct MockState {
    behavior: Behavior,
    requests: Mutex<Vec<Recorded>>,
}

/// Mock provider that returns predictable responses
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockOpenAi {
    /// Start the mock server, returning immediately
    pub async fn start(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/images/generations", routing::post(handle_generation))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the relay appends `/images/generations`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("mock state lock").clone()
    }

    /// Number of generation requests received
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().expect("mock state lock").len()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// URL the `Echo` behavior returns for a prompt
pub fn echo_url(prompt: &str) -> String {
    format!("https://example.com/{}.png", prompt.replace(' ', "-"))
}

async fn handle_generation(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let prompt = body["prompt"].as_str().unwrap_or_default().to_owned();

    state.requests.lock().expect("mock state lock").push(Recorded {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    });

    match state.behavior.clone() {
        Behavior::Echo => image_response(&echo_url(&prompt)),
        Behavior::Image(url) => image_response(&url),
        Behavior::Status(status, body) => raw_response(status, body),
        Behavior::RawSuccess(body) => raw_response(200, body),
        Behavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            image_response(&echo_url(&prompt))
        }
    }
}

fn image_response(url: &str) -> Response {
    Json(serde_json::json!({
        "created": 1_700_000_000,
        "data": [{ "url": url, "revised_prompt": "A mock image for testing" }]
    }))
    .into_response()
}

fn raw_response(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).expect("valid mock status");
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
