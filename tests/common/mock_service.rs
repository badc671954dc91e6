//! Mock command-execution service for integration tests.
//!
//! Streams scripted responses chunk by chunk, with an optional pause before
//! every chunk so boundaries survive transport coalescing, and captures the
//! submitted command strings for assertions.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Scripted response for one command submission.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub chunks: Vec<Vec<u8>>,
    pub chunk_delay: Duration,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            chunks: Vec::new(),
            chunk_delay: Duration::ZERO,
        }
    }
}

impl MockResponse {
    /// Success response streaming each chunk as its own body frame.
    pub fn stream(chunks: &[&[u8]]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            ..Self::default()
        }
    }

    /// Like [`stream`](Self::stream), pausing before every chunk.
    pub fn stream_with_delay(chunks: &[&[u8]], delay: Duration) -> Self {
        Self {
            chunk_delay: delay,
            ..Self::stream(chunks)
        }
    }

    /// Non-success status with a descriptive text body.
    pub fn error(status: u16, body: &str) -> Self {
        Self {
            status,
            chunks: vec![body.as_bytes().to_vec()],
            ..Self::default()
        }
    }
}

#[derive(Clone)]
struct MockState {
    commands: Arc<Mutex<Vec<String>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

/// Mock service speaking the `/api/terminal` contract.
pub struct MockService {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockService {
    pub async fn start() -> Self {
        let state = MockState {
            commands: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/api/terminal", post(handle_command))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        // Wait for the server to come up
        tokio::time::sleep(Duration::from_millis(10)).await;

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Enqueue the response for the next submission.
    pub async fn enqueue(&self, response: MockResponse) {
        self.state.responses.lock().await.push_back(response);
    }

    /// Command strings received so far, in arrival order.
    pub async fn captured_commands(&self) -> Vec<String> {
        self.state.commands.lock().await.clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_command(
    State(state): State<MockState>,
    Json(payload): Json<serde_json::Value>,
) -> Response<Body> {
    let command = payload
        .get("command")
        .and_then(|c| c.as_str())
        .unwrap_or_default()
        .to_string();
    state.commands.lock().await.push(command);

    let mock = state.responses.lock().await.pop_front().unwrap_or_default();
    let delay = mock.chunk_delay;

    let stream = futures_util::stream::unfold(mock.chunks.into_iter(), move |mut chunks| {
        async move {
            let chunk = chunks.next()?;
            if delay > Duration::ZERO {
                tokio::time::sleep(delay).await;
            }
            Some((Ok::<Bytes, std::io::Error>(Bytes::from(chunk)), chunks))
        }
    });

    Response::builder()
        .status(StatusCode::from_u16(mock.status).unwrap())
        .header("content-type", "text/plain")
        .body(Body::from_stream(stream))
        .unwrap()
}
