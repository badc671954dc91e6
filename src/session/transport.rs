//! HTTP client for the remote command-execution service.
//!
//! One operation: POST the command, get back an open byte stream of its
//! output. The stream is terminated by transport-level close; there is no
//! end-of-stream marker.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::session::error::TransportError;

#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    command: &'a str,
}

/// Client for the command-execution endpoint.
pub struct RemoteClient {
    client: Client,
    endpoint: String,
}

impl RemoteClient {
    pub fn new(config: &EngineConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            endpoint: format!("{}/api/terminal", config.base_url.trim_end_matches('/')),
        }
    }

    /// Submit a command. On success the response is handed back still open,
    /// ready for `bytes_stream()`; a non-2xx status becomes a typed error
    /// carrying whatever descriptive body the server sent.
    pub async fn execute(&self, command: &str) -> Result<reqwest::Response, TransportError> {
        tracing::debug!(endpoint = %self.endpoint, "submitting command");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CommandRequest { command })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}
