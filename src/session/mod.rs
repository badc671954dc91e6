//! One streaming request: decode → reassemble → apply, chunk by chunk.
//!
//! The session consumes the response stream at sequential suspension points
//! (one per chunk read), so chunks are processed exactly in arrival order.
//! The cancel token is raced against every read; observing it drops the
//! stream, which aborts the underlying request. Mutations already applied
//! to the buffer are never rolled back.

mod error;
mod transport;

pub use error::TransportError;
pub use transport::RemoteClient;

use std::sync::Arc;

use futures_util::StreamExt;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::buffer::{Line, LineBuffer, LineHandle};
use crate::cancel::CancelToken;
use crate::decode::ChunkDecoder;
use crate::reassembly::{reassemble, LineMutation};

/// How a session ended. Cancellation is an outcome, not an error.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Stream closed normally.
    Completed,
    /// Cancelled by the user mid-stream.
    Cancelled,
    /// Transport or protocol failure, before or during streaming.
    Failed(TransportError),
}

/// State for one request's stream.
pub struct StreamSession {
    request_id: Uuid,
    lines: Arc<Mutex<LineBuffer>>,
    cancel: CancelToken,
    /// Handle to the current output line; revalidated before every use,
    /// since the buffer can be cleared externally mid-stream.
    current: Option<LineHandle>,
}

impl StreamSession {
    pub fn new(request_id: Uuid, lines: Arc<Mutex<LineBuffer>>, cancel: CancelToken) -> Self {
        Self {
            request_id,
            lines,
            cancel,
            current: None,
        }
    }

    /// Drive the request to a terminal state.
    pub async fn run(mut self, client: &RemoteClient, command: &str) -> SessionOutcome {
        let request_id = self.request_id;
        tracing::debug!(%request_id, "stream session starting");

        let response = tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::debug!(%request_id, "cancelled before the stream opened");
                return SessionOutcome::Cancelled;
            }
            result = client.execute(command) => match result {
                Ok(response) => response,
                Err(err) => return SessionOutcome::Failed(err),
            },
        };

        let mut stream = response.bytes_stream();
        let mut decoder = ChunkDecoder::new();

        loop {
            let item = tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::debug!(%request_id, "cancelled mid-stream");
                    return SessionOutcome::Cancelled;
                }
                item = stream.next() => item,
            };

            match item {
                None => break,
                Some(Ok(chunk)) => {
                    let decoded = decoder.decode(&chunk);
                    self.apply(&decoded);
                }
                Some(Err(err)) => {
                    return SessionOutcome::Failed(TransportError::Connection(err));
                }
            }
        }

        // The last chunk may leave a partial character behind; flush runs
        // exactly once and its emission is committed like any other chunk.
        let tail = decoder.flush();
        self.apply(&tail);

        tracing::debug!(%request_id, "stream session completed");
        SessionOutcome::Completed
    }

    /// Apply one decoded chunk to the buffer under a single lock scope, so
    /// the validity check and the mutation cannot be interleaved with an
    /// external clear.
    fn apply(&mut self, decoded: &str) {
        let mut lines = self.lines.lock();
        let has_current = self
            .current
            .is_some_and(|handle| lines.is_current_output(handle));

        let Some(mutation) = reassemble(decoded, has_current) else {
            return;
        };

        match mutation {
            LineMutation::AppendNewLine(text) => {
                self.current = Some(lines.push(Line::output(text)));
            }
            LineMutation::ReplaceCurrentLine(text) => {
                if let Some(handle) = self.current {
                    lines.replace_text(handle, text);
                }
            }
            LineMutation::AppendToCurrentLine(text) => {
                if let Some(handle) = self.current {
                    lines.append_text(handle, &text);
                }
            }
        }
    }
}
