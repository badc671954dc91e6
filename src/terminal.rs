//! Engine facade: submission guards, sentinel lines, render snapshots.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::buffer::{Line, LineBuffer};
use crate::cancel::CancelSource;
use crate::config::EngineConfig;
use crate::lifecycle::{Reducer, RequestIntent, RequestPhase, RequestReducer, SessionEnd};
use crate::session::{RemoteClient, SessionOutcome, StreamSession};

/// Appended when the user cancels a streaming session.
pub const CANCELLED_SENTINEL: &str = "(cancelled)";

/// Appended when the remote call fails; detail goes to the log, not the display.
pub const FAILURE_SENTINEL: &str = "Error: Could not reach backend.";

/// What a call to [`Terminal::submit`] did.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input: nothing happened.
    Ignored,
    /// A session is already streaming: the submission was rejected.
    Busy,
    /// `clear` was intercepted: the buffer was emptied locally.
    Cleared,
    /// A session ran to a terminal state.
    Finished(SessionOutcome),
}

/// One terminal client instance.
///
/// Owns the line buffer, the lifecycle phase, and the transport client.
/// The rendering layer consumes [`lines`](Self::lines) and
/// [`is_busy`](Self::is_busy); nothing else is exposed. Share behind `Arc`
/// to call [`cancel`](Self::cancel) while [`submit`](Self::submit) is
/// in flight.
pub struct Terminal {
    lines: Arc<Mutex<LineBuffer>>,
    phase: Mutex<RequestPhase>,
    active_cancel: Mutex<Option<CancelSource>>,
    client: RemoteClient,
}

impl Terminal {
    pub fn new(config: EngineConfig) -> Self {
        let mut buffer = LineBuffer::new();
        if let Some(welcome) = &config.welcome_line {
            buffer.push(Line::output(welcome.clone()));
        }

        Self {
            lines: Arc::new(Mutex::new(buffer)),
            phase: Mutex::new(RequestPhase::default()),
            active_cancel: Mutex::new(None),
            client: RemoteClient::new(&config),
        }
    }

    /// Snapshot of the line buffer for the rendering layer.
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().snapshot()
    }

    /// True while a stream session is active (input should be read-only).
    pub fn is_busy(&self) -> bool {
        self.phase.lock().is_streaming()
    }

    /// Text of the most recently submitted command, for recall glue.
    pub fn last_command(&self) -> Option<String> {
        let lines = self.lines.lock();
        lines.last_input().map(|line| line.text.clone())
    }

    /// Request cancellation of the active session. Ignored while idle.
    pub fn cancel(&self) {
        if let Some(source) = self.active_cancel.lock().as_ref() {
            source.cancel();
        }
    }

    /// Submit one line of input and drive it to a terminal state.
    ///
    /// Guards, in order: blank input is a no-op; a submission while another
    /// session streams is rejected; the literal command `clear` empties the
    /// buffer synchronously and never reaches the network. Everything else
    /// echoes an input line (even if the remote call then fails) and streams.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let command = input.trim();
        if command.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let request_id = Uuid::new_v4();
        {
            let mut phase = self.phase.lock();
            if phase.is_streaming() {
                return SubmitOutcome::Busy;
            }
            if command == "clear" {
                self.lines.lock().clear();
                return SubmitOutcome::Cleared;
            }
            *phase = RequestReducer::reduce(phase.clone(), RequestIntent::Submit { request_id });
        }

        self.lines.lock().push(Line::input(command));

        let source = CancelSource::new();
        let token = source.token();
        *self.active_cancel.lock() = Some(source);

        let session = StreamSession::new(request_id, Arc::clone(&self.lines), token);
        let outcome = session.run(&self.client, command).await;

        *self.active_cancel.lock() = None;

        match &outcome {
            SessionOutcome::Completed => {}
            SessionOutcome::Cancelled => {
                self.lines.lock().push(Line::output(CANCELLED_SENTINEL));
            }
            SessionOutcome::Failed(err) => {
                tracing::warn!(%request_id, error = %err, "stream session failed");
                self.lines.lock().push(Line::output(FAILURE_SENTINEL));
            }
        }

        let end = match &outcome {
            SessionOutcome::Completed => SessionEnd::Settled,
            SessionOutcome::Cancelled => SessionEnd::Cancelled,
            SessionOutcome::Failed(_) => SessionEnd::Failed,
        };
        {
            let mut phase = self.phase.lock();
            *phase = RequestReducer::reduce(phase.clone(), RequestIntent::Finish { outcome: end });
        }

        SubmitOutcome::Finished(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_terminal() -> Terminal {
        // Guards under test never reach the network.
        Terminal::new(EngineConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            welcome_line: None,
            ..EngineConfig::default()
        })
    }

    #[tokio::test]
    async fn blank_submission_is_ignored() {
        let term = offline_terminal();
        assert!(matches!(term.submit("").await, SubmitOutcome::Ignored));
        assert!(matches!(term.submit("   \t ").await, SubmitOutcome::Ignored));
        assert!(term.lines().is_empty());
        assert!(!term.is_busy());
    }

    #[tokio::test]
    async fn clear_empties_buffer_without_network() {
        let term = Terminal::new(EngineConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..EngineConfig::default()
        });
        assert_eq!(term.lines().len(), 1); // welcome banner

        assert!(matches!(term.submit("clear").await, SubmitOutcome::Cleared));
        assert!(term.lines().is_empty());
        assert!(!term.is_busy());
    }

    #[tokio::test]
    async fn cancel_while_idle_is_ignored() {
        let term = offline_terminal();
        term.cancel();
        assert!(term.lines().is_empty());
        assert!(!term.is_busy());
    }

    #[test]
    fn welcome_line_seeds_buffer() {
        let term = Terminal::new(EngineConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            welcome_line: Some("hi there".to_string()),
            ..EngineConfig::default()
        });
        let lines = term.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "hi there");
    }

    #[tokio::test]
    async fn failed_request_appends_sentinel_and_returns_idle() {
        // Nothing listens on port 1: the connection itself fails.
        let term = offline_terminal();
        let outcome = term.submit("ping").await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Finished(SessionOutcome::Failed(_))
        ));

        let lines = term.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "ping"); // echo survives the failure
        assert_eq!(lines[1].text, FAILURE_SENTINEL);
        assert!(!term.is_busy());
    }

    #[tokio::test]
    async fn last_command_reads_most_recent_echo() {
        let term = offline_terminal();
        assert!(term.last_command().is_none());
        let _ = term.submit("ping").await;
        assert_eq!(term.last_command().as_deref(), Some("ping"));
    }
}
